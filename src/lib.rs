// ==========================================
// 临床轮转排班系统 - 核心库
// ==========================================
// 系统定位: 决策支持（站点负荷分类 + 单日学员再平衡）
// 技术栈: Rust + calamine/csv 导入 + tracing 日志
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CountPolicy, StationStatus};

// 领域实体
pub use domain::{
    ImpactSummary, OccupancyView, Placement, RosterSnapshot, Station, TransferRecord,
};

// 引擎
pub use engine::{
    ImpactSummaryEngine, LoadMetricsEngine, OccupancyTarget, RebalanceError, RebalanceOutcome,
    Rebalancer,
};

// 配置
pub use config::{BalancerConfig, ConfigManager};

// 导入
pub use importer::{ImportError, ImportOutcome, SnapshotImporter};

// API
pub use api::{ApiError, ApiResult, RebalanceApi, RebalanceReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "临床轮转排班系统";
