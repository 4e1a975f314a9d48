// ==========================================
// 临床轮转排班系统 - 影响摘要引擎
// ==========================================
// 职责: 再平衡前后对比（状态分布 + 单站点变化）
// 输入: RebalanceOutcome
// 输出: ImpactSummary
// ==========================================

use crate::domain::impact::{ImpactSummary, StationChange, StatusDistribution};
use crate::domain::station::Station;
use crate::engine::rebalancer::RebalanceOutcome;

// ==========================================
// ImpactSummaryEngine - 影响摘要引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
#[derive(Debug, Default, Clone, Copy)]
pub struct ImpactSummaryEngine;

impl ImpactSummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 生成影响摘要
    pub fn generate_impact(&self, outcome: &RebalanceOutcome) -> ImpactSummary {
        let station_changes = outcome
            .stations_before
            .iter()
            .zip(outcome.stations_after.iter())
            .zip(outcome.targets.iter())
            .map(|((before, after), target)| StationChange {
                station: before.name.clone(),
                trainees_before: before.trainee_count,
                trainees_after: after.trainee_count,
                ideal: target.ideal,
                status_before: before.status,
                status_after: after.status,
            })
            .collect();

        ImpactSummary {
            date: outcome.date,
            moved_count: outcome.transfers.len() as i32,
            before: self.status_distribution(&outcome.stations_before),
            after: self.status_distribution(&outcome.stations_after),
            station_changes,
        }
    }

    /// 统计状态分布（未分类站点不计入）
    pub fn status_distribution(&self, stations: &[Station]) -> StatusDistribution {
        let mut distribution = StatusDistribution::default();
        for status in stations.iter().filter_map(|s| s.status) {
            distribution.record(status);
        }
        distribution
    }
}
