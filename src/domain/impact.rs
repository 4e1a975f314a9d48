// ==========================================
// 临床轮转排班系统 - 影响摘要领域模型
// ==========================================
// 用途: Impact Summary Engine 输出格式（调整前后对比）
// ==========================================

use crate::domain::types::StationStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StatusDistribution - 状态分布
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub overloaded: i32,
    pub normal: i32,
    pub underutilized: i32,
}

impl StatusDistribution {
    /// 按状态取计数
    pub fn count(&self, status: StationStatus) -> i32 {
        match status {
            StationStatus::Overloaded => self.overloaded,
            StationStatus::Normal => self.normal,
            StationStatus::Underutilized => self.underutilized,
        }
    }

    /// 计数 +1
    pub fn record(&mut self, status: StationStatus) {
        match status {
            StationStatus::Overloaded => self.overloaded += 1,
            StationStatus::Normal => self.normal += 1,
            StationStatus::Underutilized => self.underutilized += 1,
        }
    }

    pub fn total(&self) -> i32 {
        self.overloaded + self.normal + self.underutilized
    }
}

// ==========================================
// StationChange - 单站点变化
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationChange {
    pub station: String,
    pub trainees_before: i32,
    pub trainees_after: i32,
    pub ideal: i32,
    pub status_before: Option<StationStatus>,
    pub status_after: Option<StationStatus>,
}

impl StationChange {
    /// 调整后仍低于理想人数的缺口（>= 0）
    pub fn remaining_shortfall(&self) -> i32 {
        (self.ideal - self.trainees_after).max(0)
    }
}

// ==========================================
// ImpactSummary - 影响摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub date: NaiveDate,
    pub moved_count: i32,                 // 调动人次
    pub before: StatusDistribution,       // 调整前分布
    pub after: StatusDistribution,        // 调整后分布
    pub station_changes: Vec<StationChange>, // 按站点输入顺序
}

impl ImpactSummary {
    /// 某状态的站点数变化（after - before）
    pub fn delta(&self, status: StationStatus) -> i32 {
        self.after.count(status) - self.before.count(status)
    }

    /// 调整后仍存在缺口的站点
    pub fn unresolved_deficits(&self) -> Vec<&StationChange> {
        self.station_changes
            .iter()
            .filter(|c| c.remaining_shortfall() > 0)
            .collect()
    }
}
