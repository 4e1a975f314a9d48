// ==========================================
// 临床轮转排班系统 - 导入层
// ==========================================
// 职责: 外部数据导入，生成已分类的排班快照
// 支持: Excel (两个 sheet), CSV (两个文件)
// ==========================================

// 模块声明
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod roster_expander;
pub mod snapshot_importer;

// 重导出核心类型
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use roster_expander::RosterExpander;
pub use snapshot_importer::{ImportOutcome, SnapshotImporter};

// 重导出 Trait 接口
pub use importer_trait::{DqCheck, FileParser, RawRow, RecordMapper, Sourced};
