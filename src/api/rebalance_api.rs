// ==========================================
// 临床轮转排班系统 - 再平衡 API
// ==========================================
// 职责: 封装导入 → 分类 → 再平衡 → 影响摘要
// 红线: 调用方持有快照，API 只读借用；应用结果需显式调用 apply
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{BalancerConfig, ConfigManager};
use crate::domain::impact::ImpactSummary;
use crate::domain::snapshot::RosterSnapshot;
use crate::domain::station::Station;
use crate::engine::{ImpactSummaryEngine, RebalanceOutcome, Rebalancer};
use crate::importer::{ImportOutcome, SnapshotImporter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// 再平衡报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceReport {
    pub outcome: RebalanceOutcome,
    pub impact: ImpactSummary,
    /// 本次运行使用的配置快照（JSON）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_snapshot: Option<String>,
}

/// 再平衡API
pub struct RebalanceApi {
    rebalancer: Rebalancer,
    importer: SnapshotImporter,
    impact_engine: ImpactSummaryEngine,
    config_snapshot: Option<String>,
}

impl RebalanceApi {
    /// 按配置管理器创建（记录配置快照）
    pub fn new(config: &ConfigManager) -> ApiResult<Self> {
        let balancer = config.balancer_config()?;
        let importer = SnapshotImporter::new(config)?;
        Ok(Self {
            rebalancer: Rebalancer::new(balancer),
            importer,
            impact_engine: ImpactSummaryEngine::new(),
            config_snapshot: Some(config.get_config_snapshot()?),
        })
    }

    /// 直接使用 BalancerConfig 创建（导入使用默认 sheet 名）
    pub fn from_config(config: BalancerConfig) -> ApiResult<Self> {
        config.check().map_err(ApiError::InvalidInput)?;
        Ok(Self {
            rebalancer: Rebalancer::new(config),
            importer: SnapshotImporter::default(),
            impact_engine: ImpactSummaryEngine::new(),
            config_snapshot: None,
        })
    }

    pub fn config(&self) -> &BalancerConfig {
        self.rebalancer.config()
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 从工作簿导入（站点表 + 名册表）
    pub fn import_workbook<P: AsRef<Path>>(&self, path: P) -> ApiResult<ImportOutcome> {
        Ok(self.importer.import_workbook(path)?)
    }

    /// 从两个 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        stations_path: P,
        roster_path: Q,
    ) -> ApiResult<ImportOutcome> {
        Ok(self.importer.import_csv(stations_path, roster_path)?)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 目标日期站点的负荷分类（返回副本，不修改快照）
    pub fn classify(&self, snapshot: &RosterSnapshot, date: NaiveDate) -> Vec<Station> {
        let mut stations: Vec<Station> = snapshot.stations_on(date).into_iter().cloned().collect();
        self.rebalancer.metrics().refresh_all(&mut stations);
        stations
    }

    /// 指定站点当天的学员（名册顺序）
    pub fn trainees_at(
        &self,
        snapshot: &RosterSnapshot,
        station: &str,
        date: NaiveDate,
    ) -> ApiResult<Vec<String>> {
        if snapshot.station(station, date).is_none() {
            return Err(ApiError::NotFound(format!(
                "站点 {} 在 {} 不存在",
                station, date
            )));
        }
        Ok(snapshot
            .trainees_at(station, date)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    // ==========================================
    // 再平衡
    // ==========================================

    /// 单日再平衡并生成影响摘要
    #[instrument(skip(self, snapshot), fields(date = %date))]
    pub fn rebalance(&self, snapshot: &RosterSnapshot, date: NaiveDate) -> ApiResult<RebalanceReport> {
        let outcome = self
            .rebalancer
            .rebalance(&snapshot.stations, &snapshot.roster, date)?;
        let impact = self.impact_engine.generate_impact(&outcome);

        info!(
            run_id = %outcome.run_id,
            moved = impact.moved_count,
            overloaded_before = impact.before.overloaded,
            overloaded_after = impact.after.overloaded,
            "再平衡报告生成完成"
        );

        Ok(RebalanceReport {
            outcome,
            impact,
            config_snapshot: self.config_snapshot.clone(),
        })
    }

    /// 将报告应用到快照，返回新快照（原快照不变）
    ///
    /// 目标日期站点替换为调整后站点，名册替换为更新后名册
    pub fn apply(&self, snapshot: &RosterSnapshot, report: &RebalanceReport) -> RosterSnapshot {
        let outcome = &report.outcome;
        if outcome.is_empty() {
            return snapshot.clone();
        }

        let stations = snapshot
            .stations
            .iter()
            .map(|s| {
                if s.date != outcome.date {
                    return s.clone();
                }
                outcome
                    .stations_after
                    .iter()
                    .find(|a| a.name == s.name)
                    .cloned()
                    .unwrap_or_else(|| s.clone())
            })
            .collect();

        RosterSnapshot::new(stations, outcome.roster.clone())
    }
}
