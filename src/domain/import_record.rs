// ==========================================
// 临床轮转排班系统 - 导入中间结构 & 数据质量
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构 → 校验 → 领域对象）
// 生命周期: 仅在导入流程内
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawStationRecord - 站点行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStationRecord {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub capacity: Option<i32>,
    pub patient_volume: Option<i32>,
    pub trainee_count: Option<i32>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// RawPlacementRecord - 名册行
// ==========================================
// date 为 None 表示名册缺少日期列，由 RosterExpander 复制到各日期
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlacementRecord {
    pub trainee: Option<String>,
    pub date: Option<NaiveDate>,
    pub station: Option<String>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 错误（阻断导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub sheet: String,      // 来源表（stations / roster）
    pub row_number: usize,  // 行号（从 1 开始，不含表头）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub station_rows: usize,
    pub roster_rows: usize,
    pub blocked: usize, // ERROR
    pub warning: usize, // WARNING
    pub info: usize,    // INFO
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    /// 由违规明细汇总
    pub fn from_violations(
        station_rows: usize,
        roster_rows: usize,
        violations: Vec<DqViolation>,
    ) -> Self {
        let count = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();
        Self {
            summary: DqSummary {
                station_rows,
                roster_rows,
                blocked: count(DqLevel::Error),
                warning: count(DqLevel::Warning),
                info: count(DqLevel::Info),
            },
            violations,
        }
    }

    /// 是否存在阻断级问题
    pub fn has_errors(&self) -> bool {
        self.summary.blocked > 0
    }

    /// 阻断级问题明细
    pub fn errors(&self) -> Vec<&DqViolation> {
        self.violations
            .iter()
            .filter(|v| v.level == DqLevel::Error)
            .collect()
    }
}
