// ==========================================
// 临床轮转排班系统 - 引擎层
// ==========================================
// 职责: 负荷分类、单日再平衡、前后影响对比
// 红线: 引擎不读文件, 不持有可变共享状态
// ==========================================

pub mod error;
pub mod impact_summary;
pub mod metrics;
pub mod rebalancer;
pub mod validation;

// 重导出核心引擎
pub use error::{RebalanceError, RebalanceResult};
pub use impact_summary::ImpactSummaryEngine;
pub use metrics::LoadMetricsEngine;
pub use rebalancer::{OccupancyTarget, RebalanceOutcome, Rebalancer};
pub use validation::validate_day;
