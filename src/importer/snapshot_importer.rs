// ==========================================
// 临床轮转排班系统 - 快照导入器
// ==========================================
// 职责: 整合导入流程，从文件到已分类的 RosterSnapshot
// 流程: 解析 → 映射 → 名册日期展开 → DQ 校验 → 构建领域对象 → 负荷分类
// 红线: 存在 ERROR 级问题时不返回快照
// ==========================================

use crate::config::{ConfigManager, ConfigResult};
use crate::domain::import_record::{
    DqLevel, DqReport, DqViolation, RawPlacementRecord, RawStationRecord,
};
use crate::domain::placement::Placement;
use crate::domain::snapshot::RosterSnapshot;
use crate::domain::station::Station;
use crate::engine::metrics::LoadMetricsEngine;
use crate::importer::dq_validator::{DqValidator, SHEET_ROSTER, SHEET_STATIONS};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{DqCheck, FileParser, RawRow, RecordMapper, Sourced};
use crate::importer::roster_expander::RosterExpander;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub const DEFAULT_STATION_SHEET: &str = "dummy_wahana_data";
pub const DEFAULT_ROSTER_SHEET: &str = "data_peserta";

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub snapshot: RosterSnapshot,
    /// 仅含 WARNING / INFO（ERROR 会中止导入）
    pub dq_report: DqReport,
}

// ==========================================
// SnapshotImporter - 快照导入器
// ==========================================
pub struct SnapshotImporter {
    station_sheet: String,
    roster_sheet: String,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn RecordMapper>,
    dq_validator: Box<dyn DqCheck>,
    roster_expander: RosterExpander,

    // 导入后负荷分类
    metrics: LoadMetricsEngine,
}

impl Default for SnapshotImporter {
    fn default() -> Self {
        Self::with_components(
            DEFAULT_STATION_SHEET,
            DEFAULT_ROSTER_SHEET,
            Box::new(UniversalFileParser),
            Box::new(FieldMapper),
            Box::new(DqValidator),
            LoadMetricsEngine::default(),
        )
    }
}

impl SnapshotImporter {
    /// 按配置创建（sheet 名、分类阈值）
    pub fn new(config: &ConfigManager) -> ConfigResult<Self> {
        let balancer = config.balancer_config()?;
        Ok(Self::with_components(
            &config.get_station_sheet()?,
            &config.get_roster_sheet()?,
            Box::new(UniversalFileParser),
            Box::new(FieldMapper),
            Box::new(DqValidator),
            LoadMetricsEngine::from_config(&balancer),
        ))
    }

    /// 自定义组件创建
    ///
    /// # 参数
    /// - station_sheet / roster_sheet: 工作簿中的 sheet 名
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - dq_validator: DQ 校验器
    /// - metrics: 负荷分类引擎
    pub fn with_components(
        station_sheet: &str,
        roster_sheet: &str,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn RecordMapper>,
        dq_validator: Box<dyn DqCheck>,
        metrics: LoadMetricsEngine,
    ) -> Self {
        Self {
            station_sheet: station_sheet.to_string(),
            roster_sheet: roster_sheet.to_string(),
            file_parser,
            field_mapper,
            dq_validator,
            roster_expander: RosterExpander,
            metrics,
        }
    }

    /// 从单个工作簿导入（站点表 + 名册表两个 sheet）
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_workbook<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportOutcome> {
        let path = path.as_ref();
        let station_rows = self
            .file_parser
            .parse_to_raw_records(path, Some(&self.station_sheet))?;
        let roster_rows = self
            .file_parser
            .parse_to_raw_records(path, Some(&self.roster_sheet))?;
        self.import_rows(station_rows, roster_rows)
    }

    /// 从两个 CSV 文件导入
    #[instrument(skip(self, stations_path, roster_path))]
    pub fn import_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        stations_path: P,
        roster_path: Q,
    ) -> ImportResult<ImportOutcome> {
        let station_rows = self
            .file_parser
            .parse_to_raw_records(stations_path.as_ref(), None)?;
        let roster_rows = self
            .file_parser
            .parse_to_raw_records(roster_path.as_ref(), None)?;
        self.import_rows(station_rows, roster_rows)
    }

    /// 从已解析的原始行导入
    pub fn import_rows(
        &self,
        station_rows: Vec<RawRow>,
        roster_rows: Vec<RawRow>,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(
            batch_id = %batch_id,
            station_rows = station_rows.len(),
            roster_rows = roster_rows.len(),
            "开始导入排班快照"
        );

        let mut violations = Vec::new();

        // === 步骤 1: 字段映射 ===
        debug!("步骤 1: 字段映射");
        let mut station_records: Vec<RawStationRecord> = Vec::new();
        for (idx, row) in station_rows.iter().enumerate() {
            match self.field_mapper.map_station(row, idx + 1) {
                Ok(record) => station_records.push(record),
                Err(e) => violations.push(mapping_violation(SHEET_STATIONS, idx + 1, &e)),
            }
        }
        let mut placement_records: Vec<RawPlacementRecord> = Vec::new();
        for (idx, row) in roster_rows.iter().enumerate() {
            match self.field_mapper.map_placement(row, idx + 1) {
                Ok(record) => placement_records.push(record),
                Err(e) => violations.push(mapping_violation(SHEET_ROSTER, idx + 1, &e)),
            }
        }

        // === 步骤 2: 名册日期展开 ===
        debug!("步骤 2: 名册日期展开");
        let dates = self.roster_expander.station_dates(&station_records);
        let placement_records = self.roster_expander.expand(placement_records, &dates);

        // === 步骤 3: DQ 校验 ===
        debug!("步骤 3: DQ 校验");
        violations.extend(self.dq_validator.validate_stations(&station_records));
        violations.extend(self.dq_validator.validate_placements(&placement_records));

        let row_level_errors = violations.iter().any(|v| v.level == DqLevel::Error);
        let (mut stations, roster) = if row_level_errors {
            (Vec::new(), Vec::new())
        } else {
            let stations = build_stations(&station_records);
            let roster = build_roster(&placement_records);
            violations.extend(self.dq_validator.validate_consistency(&stations, &roster));
            (
                stations.into_iter().map(|(_, s)| s).collect::<Vec<_>>(),
                roster.into_iter().map(|(_, p)| p).collect::<Vec<_>>(),
            )
        };

        let dq_report = DqReport::from_violations(
            station_records.len(),
            placement_records.len(),
            violations,
        );
        info!(
            blocked = dq_report.summary.blocked,
            warning = dq_report.summary.warning,
            info = dq_report.summary.info,
            "DQ 校验完成"
        );

        if dq_report.has_errors() {
            let first = dq_report
                .errors()
                .first()
                .map(|v| describe(v))
                .unwrap_or_default();
            warn!(batch_id = %batch_id, blocked = dq_report.summary.blocked, first = %first, "导入被 DQ 阻断");
            return Err(ImportError::DataQuality {
                blocked: dq_report.summary.blocked,
                first,
            });
        }

        for violation in dq_report
            .violations
            .iter()
            .filter(|v| v.level == DqLevel::Warning)
        {
            warn!(row_number = violation.row_number, field = %violation.field, "{}", violation.message);
        }

        // === 步骤 4: 负荷分类 ===
        debug!("步骤 4: 负荷分类");
        self.metrics.refresh_all(&mut stations);

        info!(
            batch_id = %batch_id,
            stations = stations.len(),
            placements = roster.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "排班快照导入完成"
        );

        Ok(ImportOutcome {
            batch_id,
            snapshot: RosterSnapshot::new(stations, roster),
            dq_report,
        })
    }
}

/// 映射失败 → ERROR 级违规
fn mapping_violation(sheet: &str, row_number: usize, error: &ImportError) -> DqViolation {
    let field = match error {
        ImportError::TypeConversionError { field, .. } | ImportError::DateFormatError { field, .. } => {
            field.clone()
        }
        _ => "row".to_string(),
    };
    DqViolation {
        sheet: sheet.to_string(),
        row_number,
        level: DqLevel::Error,
        field,
        message: error.to_string(),
    }
}

fn describe(violation: &DqViolation) -> String {
    format!(
        "[{} 第 {} 行] {}: {}",
        violation.sheet, violation.row_number, violation.field, violation.message
    )
}

/// 字段完整的站点行 → Station（未分类）
fn build_stations(records: &[RawStationRecord]) -> Vec<Sourced<Station>> {
    records
        .iter()
        .filter_map(|r| match (&r.name, r.date, r.capacity, r.patient_volume, r.trainee_count) {
            (Some(name), Some(date), Some(capacity), Some(patients), Some(trainees)) => {
                Some((
                    r.row_number,
                    Station::new(name.clone(), date, capacity, patients, trainees),
                ))
            }
            _ => None,
        })
        .collect()
}

/// 字段完整的名册行 → Placement
fn build_roster(records: &[RawPlacementRecord]) -> Vec<Sourced<Placement>> {
    records
        .iter()
        .filter_map(|r| match (&r.trainee, r.date, &r.station) {
            (Some(trainee), Some(date), Some(station)) => {
                Some((r.row_number, Placement::new(trainee.clone(), date, station.clone())))
            }
            _ => None,
        })
        .collect()
}
