// ==========================================
// 临床轮转排班系统 - 学员排位 & 调动记录
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Placement - 学员排位（一人一日一条）
// ==========================================
// 红线: 导入时创建；仅 Rebalancer 可修改 station；运行中不删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub trainee: String,   // 学员姓名（同日唯一）
    pub date: NaiveDate,   // 日期
    pub station: String,   // 所在站点
}

impl Placement {
    pub fn new(trainee: impl Into<String>, date: NaiveDate, station: impl Into<String>) -> Self {
        Self {
            trainee: trainee.into(),
            date,
            station: station.into(),
        }
    }

    /// 是否位于 (站点, 日期)
    pub fn is_at(&self, station: &str, date: NaiveDate) -> bool {
        self.date == date && self.station == station
    }
}

// ==========================================
// TransferRecord - 调动记录
// ==========================================
// 用途: 单次再平衡的追加式日志，不跨次持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub trainee: String,     // 学员
    pub from: String,        // 来源站点（盈余）
    pub to: String,          // 目标站点（缺口）
    pub date: NaiveDate,     // 日期
}
