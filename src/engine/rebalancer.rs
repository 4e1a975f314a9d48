// ==========================================
// 临床轮转排班系统 - 学员再平衡引擎
// ==========================================
// 职责: 单日站点学员数再平衡（贪心，一遍完成）
// 输入: 站点快照 + 名册 + 目标日期（只读借用）
// 输出: 调整前/后站点、更新后名册（全部日期）、调动日志
// ==========================================
// 规则:
// 1) 理想人数 = round(病人数 / target_ratio)，夹到 [1, capacity]
// 2) 偏差 = 当前人数 - 理想人数；>0 盈余，<0 缺口
// 3) 缺口站点按输入顺序，依次从盈余站点（输入顺序）调入
//    min(盈余, 需求) 人；调动者为名册中该站点当天最靠前的学员
// 4) 按新名册重新计数，重新分类
// 红线: 不修改调用方快照；校验失败不返回任何部分结果
// ==========================================

use crate::config::BalancerConfig;
use crate::domain::placement::{Placement, TransferRecord};
use crate::domain::station::{OccupancyView, Station};
use crate::domain::types::CountPolicy;
use crate::engine::error::{RebalanceError, RebalanceResult};
use crate::engine::metrics::LoadMetricsEngine;
use crate::engine::validation::validate_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// 单站点理想占用（与输入站点同序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyTarget {
    pub station: String,
    pub ideal: i32,
    /// 调整前偏差（当前 - 理想）
    pub delta: i32,
}

/// 单次再平衡结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceOutcome {
    pub run_id: String,
    pub date: NaiveDate,
    /// 调整前（已分类）
    pub stations_before: Vec<Station>,
    /// 调整后（已重新计数、重新分类）
    pub stations_after: Vec<Station>,
    /// 更新后名册（包含其他日期，其他日期原样保留）
    pub roster: Vec<Placement>,
    pub transfers: Vec<TransferRecord>,
    pub targets: Vec<OccupancyTarget>,
}

impl RebalanceOutcome {
    /// 目标日期无站点时的空结果
    fn empty(run_id: String, date: NaiveDate) -> Self {
        Self {
            run_id,
            date,
            stations_before: Vec::new(),
            stations_after: Vec::new(),
            roster: Vec::new(),
            transfers: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// 是否为空结果
    pub fn is_empty(&self) -> bool {
        self.stations_after.is_empty()
    }

    pub fn has_transfers(&self) -> bool {
        !self.transfers.is_empty()
    }

    /// 指定日期的调动记录
    pub fn transfers_for(&self, date: NaiveDate) -> Vec<&TransferRecord> {
        self.transfers.iter().filter(|t| t.date == date).collect()
    }

    /// 调整后仍低于理想人数的站点: (站点名, 缺口人数)
    pub fn remaining_deficits(&self) -> Vec<(&str, i32)> {
        self.stations_after
            .iter()
            .zip(self.targets.iter())
            .filter_map(|(station, target)| {
                let shortfall = target.ideal - station.trainee_count;
                (shortfall > 0).then_some((station.name.as_str(), shortfall))
            })
            .collect()
    }

    /// 拆为 (更新后站点, 更新后名册, 调动日志)
    pub fn into_parts(self) -> (Vec<Station>, Vec<Placement>, Vec<TransferRecord>) {
        (self.stations_after, self.roster, self.transfers)
    }
}

// ==========================================
// Rebalancer - 学员再平衡引擎
// ==========================================
// 红线: 只持有不可变配置，可跨线程共享
#[derive(Debug, Clone)]
pub struct Rebalancer {
    config: BalancerConfig,
    metrics: LoadMetricsEngine,
}

impl Default for Rebalancer {
    fn default() -> Self {
        Self::new(BalancerConfig::default())
    }
}

impl Rebalancer {
    pub fn new(config: BalancerConfig) -> Self {
        let metrics = LoadMetricsEngine::from_config(&config);
        Self { config, metrics }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoadMetricsEngine {
        &self.metrics
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算理想占用与偏差（不修改站点）
    pub fn occupancy_targets(&self, stations: &[Station]) -> Vec<OccupancyTarget> {
        stations
            .iter()
            .map(|s| OccupancyTarget {
                station: s.name.clone(),
                ideal: s.ideal_trainees(self.config.target_ratio),
                delta: s.occupancy_delta(self.config.target_ratio),
            })
            .collect()
    }

    /// 单日再平衡
    ///
    /// # 参数
    /// - `stations`: 站点快照（可包含其他日期，内部按 date 过滤）
    /// - `roster`: 名册（可包含其他日期，只调整 date 当天）
    /// - `date`: 目标日期
    ///
    /// # 返回
    /// - Ok(RebalanceOutcome): 目标日期无站点且无排位时为空结果
    /// - Err(RebalanceError): 输入校验失败
    #[instrument(skip(self, stations, roster), fields(
        date = %date,
        stations_count = stations.len(),
        roster_count = roster.len()
    ))]
    pub fn rebalance(
        &self,
        stations: &[Station],
        roster: &[Placement],
        date: NaiveDate,
    ) -> RebalanceResult<RebalanceOutcome> {
        self.config.check().map_err(RebalanceError::InvalidConfig)?;
        let run_id = uuid::Uuid::new_v4().to_string();

        // 1. 过滤当天站点
        let mut before: Vec<Station> = stations.iter().filter(|s| s.date == date).cloned().collect();
        if before.is_empty() {
            let placements = roster.iter().filter(|p| p.date == date).count();
            if placements > 0 {
                return Err(RebalanceError::OrphanRoster { date, placements });
            }
            info!(run_id = %run_id, "目标日期无站点数据，返回空结果");
            return Ok(RebalanceOutcome::empty(run_id, date));
        }

        // 2. 校验（任何修改之前）
        validate_day(&before, roster, date, self.config.count_policy)?;

        // 3. 计数口径：以名册为准时先对齐
        if self.config.count_policy == CountPolicy::DeriveFromRoster {
            let counts = count_by_station(roster, date);
            for station in before.iter_mut() {
                let actual = counts.get(station.name.as_str()).copied().unwrap_or(0);
                if actual != station.trainee_count {
                    warn!(
                        station = %station.name,
                        recorded = station.trainee_count,
                        rostered = actual,
                        "站点学员数与名册不一致，按名册重新计数"
                    );
                    station.trainee_count = actual;
                }
            }
        }
        self.metrics.refresh_all(&mut before);

        // 4. 理想占用与偏差
        let targets = self.occupancy_targets(&before);
        let mut deltas: Vec<i32> = targets.iter().map(|t| t.delta).collect();
        let surplus_idx: Vec<usize> = (0..deltas.len()).filter(|&i| deltas[i] > 0).collect();
        let deficit_idx: Vec<usize> = (0..deltas.len()).filter(|&i| deltas[i] < 0).collect();

        debug!(
            surplus = surplus_idx.len(),
            deficit = deficit_idx.len(),
            "盈余/缺口站点识别完成"
        );

        // 5. 贪心调动
        let mut updated_roster = roster.to_vec();
        let mut transfers = Vec::new();

        for &di in &deficit_idx {
            let mut need = deltas[di].abs();
            for &si in &surplus_idx {
                if need <= 0 {
                    break;
                }
                let available = deltas[si];
                if available <= 0 {
                    continue;
                }

                let wanted = available.min(need);
                let moved = move_trainees(
                    &mut updated_roster,
                    &before[si].name,
                    &before[di].name,
                    date,
                    wanted,
                    &mut transfers,
                );

                deltas[si] -= moved;
                deltas[di] += moved;
                need -= moved;
            }
        }

        // 6. 重新计数 + 重新分类
        let counts = count_by_station(&updated_roster, date);
        let mut after = before.clone();
        for station in after.iter_mut() {
            station.trainee_count = counts.get(station.name.as_str()).copied().unwrap_or(0);
        }
        self.metrics.refresh_all(&mut after);

        let outcome = RebalanceOutcome {
            run_id,
            date,
            stations_before: before,
            stations_after: after,
            roster: updated_roster,
            transfers,
            targets,
        };

        for (station, shortfall) in outcome.remaining_deficits() {
            warn!(station = %station, shortfall, "盈余不足，站点仍低于理想人数");
        }
        info!(
            run_id = %outcome.run_id,
            transfers = outcome.transfers.len(),
            "再平衡完成"
        );

        Ok(outcome)
    }
}

/// 将 from 站点当天名册最靠前的 count 名学员调到 to 站点
///
/// # 返回
/// 实际调动人数（名册人数不足时可能小于 count）
fn move_trainees(
    roster: &mut [Placement],
    from: &str,
    to: &str,
    date: NaiveDate,
    count: i32,
    transfers: &mut Vec<TransferRecord>,
) -> i32 {
    let mut moved = 0;
    for placement in roster.iter_mut() {
        if moved >= count {
            break;
        }
        if !placement.is_at(from, date) {
            continue;
        }
        placement.station = to.to_string();
        debug!(trainee = %placement.trainee, from, to, "学员调动");
        transfers.push(TransferRecord {
            trainee: placement.trainee.clone(),
            from: from.to_string(),
            to: to.to_string(),
            date,
        });
        moved += 1;
    }
    moved
}

/// 按站点统计当天名册人数
fn count_by_station(roster: &[Placement], date: NaiveDate) -> HashMap<&str, i32> {
    let mut counts = HashMap::new();
    for placement in roster.iter().filter(|p| p.date == date) {
        *counts.entry(placement.station.as_str()).or_insert(0) += 1;
    }
    counts
}
