// ==========================================
// 临床轮转排班系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 校验失败时不返回任何部分修改的结果
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 再平衡输入校验错误
///
/// 所有变体均属 ValidationError 类别，`code()` 提供稳定的区分码
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RebalanceError {
    #[error("站点容量非法: station={station}, date={date}, capacity={capacity}（必须 >= 1）")]
    InvalidCapacity {
        station: String,
        date: NaiveDate,
        capacity: i32,
    },

    #[error("数值为负: station={station}, date={date}, 字段 {field}={value}")]
    NegativeValue {
        station: String,
        date: NaiveDate,
        field: String,
        value: i32,
    },

    #[error("必填字段缺失: {field}（{context}）")]
    MissingField { field: String, context: String },

    #[error("站点重复: station={station}, date={date}")]
    DuplicateStation { station: String, date: NaiveDate },

    #[error("学员同日重复排位: trainee={trainee}, date={date}")]
    DuplicateTrainee { trainee: String, date: NaiveDate },

    #[error("名册引用了不存在的站点: trainee={trainee}, station={station}, date={date}")]
    UnknownStation {
        trainee: String,
        station: String,
        date: NaiveDate,
    },

    #[error("日期 {date} 无站点数据，但名册中有 {placements} 条排位")]
    OrphanRoster { date: NaiveDate, placements: usize },

    #[error("学员数与名册不一致: station={station}, date={date}, 站点表={recorded}, 名册={rostered}")]
    TraineeCountMismatch {
        station: String,
        date: NaiveDate,
        recorded: i32,
        rostered: i32,
    },

    #[error("再平衡参数非法: {0}")]
    InvalidConfig(String),
}

impl RebalanceError {
    /// 稳定错误码（供表现层做文案映射）
    pub fn code(&self) -> &'static str {
        match self {
            RebalanceError::InvalidCapacity { .. } => "INVALID_CAPACITY",
            RebalanceError::NegativeValue { .. } => "NEGATIVE_VALUE",
            RebalanceError::MissingField { .. } => "MISSING_FIELD",
            RebalanceError::DuplicateStation { .. } => "DUPLICATE_STATION",
            RebalanceError::DuplicateTrainee { .. } => "DUPLICATE_TRAINEE",
            RebalanceError::UnknownStation { .. } => "UNKNOWN_STATION",
            RebalanceError::OrphanRoster { .. } => "ORPHAN_ROSTER",
            RebalanceError::TraineeCountMismatch { .. } => "TRAINEE_COUNT_MISMATCH",
            RebalanceError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

/// Result 类型别名
pub type RebalanceResult<T> = Result<T, RebalanceError>;
