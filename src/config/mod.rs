// ==========================================
// 临床轮转排班系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持覆写与快照
// 存储: 内存 key-value（不持久化）
// ==========================================

pub mod balancer_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use balancer_config::BalancerConfig;
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
