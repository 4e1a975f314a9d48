// ==========================================
// 临床轮转排班系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// ==========================================

use crate::domain::import_record::{DqViolation, RawPlacementRecord, RawStationRecord};
use crate::domain::placement::Placement;
use crate::domain::station::Station;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行（列名 → 单元格文本）
pub type RawRow = HashMap<String, String>;

/// 附带源表行号的记录（行号从 1 开始，不含表头）
pub type Sourced<T> = (usize, T);

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名（CSV 忽略；Excel 为 None 时取第一个工作表）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（已跳过全空行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path, sheet: Option<&str>)
        -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait RecordMapper: Send + Sync {
    /// 站点行 → RawStationRecord
    fn map_station(&self, row: &RawRow, row_number: usize) -> ImportResult<RawStationRecord>;

    /// 名册行 → RawPlacementRecord
    fn map_placement(&self, row: &RawRow, row_number: usize) -> ImportResult<RawPlacementRecord>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口（阶段 3）
// 实现者: DqValidator
pub trait DqCheck: Send + Sync {
    /// 校验站点行（字段完整性、取值范围、重复）
    fn validate_stations(&self, records: &[RawStationRecord]) -> Vec<DqViolation>;

    /// 校验名册行（字段完整性、同日重复）
    fn validate_placements(&self, records: &[RawPlacementRecord]) -> Vec<DqViolation>;

    /// 交叉校验（名册引用站点存在、学员数一致）
    ///
    /// 违规行号取自源表行号（无日期名册展开后仍指向原始行）
    fn validate_consistency(
        &self,
        stations: &[Sourced<Station>],
        roster: &[Sourced<Placement>],
    ) -> Vec<DqViolation>;
}
