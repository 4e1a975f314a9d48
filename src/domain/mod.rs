// ==========================================
// 临床轮转排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod impact;
pub mod import_record;
pub mod placement;
pub mod snapshot;
pub mod station;
pub mod types;

// 重导出核心类型
pub use impact::{ImpactSummary, StationChange, StatusDistribution};
pub use import_record::{
    DqLevel, DqReport, DqSummary, DqViolation, RawPlacementRecord, RawStationRecord,
};
pub use placement::{Placement, TransferRecord};
pub use snapshot::RosterSnapshot;
pub use station::{OccupancyView, Station};
pub use types::{CountPolicy, StationStatus};
