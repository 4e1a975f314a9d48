// ==========================================
// 临床轮转排班系统 - API层错误类型
// ==========================================
// 职责: 汇总引擎/导入/配置错误，对外暴露稳定错误码
// 可解释性: 所有错误信息必须包含显式原因
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::RebalanceError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 下层错误
    // ==========================================
    /// 再平衡校验失败（整次运行中止，无部分结果）
    #[error("再平衡失败: {0}")]
    Rebalance(#[from] RebalanceError),

    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 业务输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),
}

impl ApiError {
    /// 稳定错误码（下层错误沿用其自身错误码）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Rebalance(e) => e.code(),
            ApiError::Import(e) => e.code(),
            ApiError::Config(e) => match e {
                ConfigError::ReadError { .. } => "CONFIG_READ_ERROR",
                ConfigError::ParseError(_) => "CONFIG_PARSE_ERROR",
                ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
                ConfigError::LockError(_) => "CONFIG_LOCK_ERROR",
            },
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
