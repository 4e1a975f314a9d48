// ==========================================
// 临床轮转排班系统 - 站点领域模型
// ==========================================
// 一个站点在一个日期上的快照 (一站一日一条)
// ==========================================

use crate::domain::types::StationStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Station - 轮转站点（单日）
// ==========================================
// 红线: trainee_count 必须等于名册中 (station, date) 的条目数
//       仅在再平衡过程中允许暂时不一致
// 用途: 导入层写入,引擎层复制后修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    // ===== 主键 =====
    pub name: String,    // 站点名称
    pub date: NaiveDate, // 日期

    // ===== 容量参数 =====
    pub capacity: i32,       // 最大学员数 (>= 1)
    pub patient_volume: i32, // 病人数 (>= 0)

    // ===== 实际占用 =====
    pub trainee_count: i32, // 当前学员数 (派生自名册)

    // ===== 派生指标 (Metrics Engine 输出) =====
    pub load_ratio: i32,                 // 病人数 / max(学员数, 1)，向零截断
    pub status: Option<StationStatus>,   // 负荷状态（未分类时为 None）
}

impl Station {
    /// 创建站点（派生指标为空，需经 Metrics Engine 刷新）
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        capacity: i32,
        patient_volume: i32,
        trainee_count: i32,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            capacity,
            patient_volume,
            trainee_count,
            load_ratio: 0,
            status: None,
        }
    }

    /// 是否匹配 (名称, 日期)
    pub fn is_at(&self, name: &str, date: NaiveDate) -> bool {
        self.date == date && self.name == name
    }
}

// ==========================================
// Trait: OccupancyView
// ==========================================
// 用途: Rebalancer 读取理想占用与偏差
pub trait OccupancyView {
    /// 理想学员数
    ///
    /// # 参数
    /// - `target_ratio`: 目标 病人/学员 比
    ///
    /// # 返回
    /// round(patient_volume / target_ratio)，四舍五入(远离零)，再夹到 [1, capacity]
    fn ideal_trainees(&self, target_ratio: f64) -> i32;

    /// 偏差 = 当前学员数 - 理想学员数（>0 盈余，<0 缺口）
    fn occupancy_delta(&self, target_ratio: f64) -> i32;
}

impl OccupancyView for Station {
    fn ideal_trainees(&self, target_ratio: f64) -> i32 {
        let raw = (f64::from(self.patient_volume) / target_ratio).round();
        // capacity >= 1 由调用方校验；此处 max(1) 防止 clamp 上下界倒置
        let upper = self.capacity.max(1);
        if raw >= f64::from(upper) {
            upper
        } else if raw <= 1.0 {
            1
        } else {
            raw as i32
        }
    }

    fn occupancy_delta(&self, target_ratio: f64) -> i32 {
        self.trainee_count - self.ideal_trainees(target_ratio)
    }
}
