// ==========================================
// 临床轮转排班系统 - 负荷指标引擎
// ==========================================
// 职责: 负荷比计算 + 三分类
// 输入: 站点 (patient_volume, trainee_count)
// 输出: load_ratio + StationStatus
// ==========================================
// 注意: trainee_count == 0 时分母按 1 计算，负荷比 == 病人数，
//       因此无学员但病人 >= 8 的站点不会被判为 Underutilized。
//       该口径沿用既有排班表规则，保留不改（是否为有意策略待业务确认）。
// ==========================================

use crate::config::BalancerConfig;
use crate::domain::station::Station;
use crate::domain::types::StationStatus;

// ==========================================
// LoadMetricsEngine - 负荷指标引擎
// ==========================================
// 红线: 无状态引擎（仅持有阈值），所有方法都是纯函数
#[derive(Debug, Clone, Copy)]
pub struct LoadMetricsEngine {
    overloaded_ratio: i32,
    underutilized_ratio: i32,
}

impl Default for LoadMetricsEngine {
    fn default() -> Self {
        Self::from_config(&BalancerConfig::default())
    }
}

impl LoadMetricsEngine {
    /// 使用默认阈值（> 18 超负荷，< 8 利用不足）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置读取阈值
    pub fn from_config(config: &BalancerConfig) -> Self {
        Self {
            overloaded_ratio: config.overloaded_ratio,
            underutilized_ratio: config.underutilized_ratio,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 负荷比 = 病人数 / max(学员数, 1)，整数截断
    pub fn load_ratio(&self, patient_volume: i32, trainee_count: i32) -> i32 {
        let effective_trainees = if trainee_count == 0 { 1 } else { trainee_count };
        patient_volume / effective_trainees
    }

    /// 由负荷比判定状态
    pub fn status_for_ratio(&self, ratio: i32) -> StationStatus {
        if ratio > self.overloaded_ratio {
            StationStatus::Overloaded
        } else if ratio < self.underutilized_ratio {
            StationStatus::Underutilized
        } else {
            StationStatus::Normal
        }
    }

    /// 站点分类
    pub fn classify(&self, station: &Station) -> StationStatus {
        self.status_for_ratio(self.load_ratio(station.patient_volume, station.trainee_count))
    }

    /// 原地刷新站点派生指标（trainee_count 变化后必须调用）
    pub fn refresh(&self, station: &mut Station) {
        station.load_ratio = self.load_ratio(station.patient_volume, station.trainee_count);
        station.status = Some(self.status_for_ratio(station.load_ratio));
    }

    /// 批量刷新
    pub fn refresh_all(&self, stations: &mut [Station]) {
        for station in stations.iter_mut() {
            self.refresh(station);
        }
    }
}
