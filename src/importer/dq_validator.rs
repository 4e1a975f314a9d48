// ==========================================
// 临床轮转排班系统 - 数据质量校验器实现
// ==========================================
// 职责: 站点行 / 名册行 / 交叉一致性校验 + 违规明细
// 级别: ERROR 阻断导入 / WARNING 允许导入 / INFO 仅记录
// ==========================================

use crate::domain::import_record::{DqLevel, DqViolation, RawPlacementRecord, RawStationRecord};
use crate::domain::placement::Placement;
use crate::domain::station::Station;
use crate::importer::importer_trait::{DqCheck, Sourced};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

pub const SHEET_STATIONS: &str = "stations";
pub const SHEET_ROSTER: &str = "roster";

pub struct DqValidator;

impl DqValidator {
    fn violation(
        sheet: &str,
        row_number: usize,
        level: DqLevel,
        field: &str,
        message: String,
    ) -> DqViolation {
        DqViolation {
            sheet: sheet.to_string(),
            row_number,
            level,
            field: field.to_string(),
            message,
        }
    }
}

impl DqCheck for DqValidator {
    fn validate_stations(&self, records: &[RawStationRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

        for record in records {
            let row = record.row_number;
            let err = |field: &str, message: String| {
                Self::violation(SHEET_STATIONS, row, DqLevel::Error, field, message)
            };

            // 必填字段
            if record.name.is_none() {
                violations.push(err("name", "站点名称缺失".to_string()));
            }
            if record.date.is_none() {
                violations.push(err("date", "日期缺失".to_string()));
            }

            // 容量必须为正
            match record.capacity {
                None => violations.push(err("capacity", "容量缺失".to_string())),
                Some(c) if c <= 0 => {
                    violations.push(err("capacity", format!("容量必须大于 0，实际 {}", c)))
                }
                _ => {}
            }

            // 病人量、学员数不可为负
            for (field, value) in [
                ("patient_volume", record.patient_volume),
                ("trainee_count", record.trainee_count),
            ] {
                match value {
                    None => violations.push(err(field, format!("{} 缺失", field))),
                    Some(v) if v < 0 => {
                        violations.push(err(field, format!("{} 不可为负，实际 {}", field, v)))
                    }
                    _ => {}
                }
            }

            // 同日站点重复
            if let (Some(name), Some(date)) = (&record.name, record.date) {
                if !seen.insert((name.clone(), date)) {
                    violations.push(err("name", format!("站点 {} 在 {} 重复出现", name, date)));
                }
            }
        }

        violations
    }

    fn validate_placements(&self, records: &[RawPlacementRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

        for record in records {
            let row = record.row_number;
            let err = |field: &str, message: String| {
                Self::violation(SHEET_ROSTER, row, DqLevel::Error, field, message)
            };

            if record.trainee.is_none() {
                violations.push(err("trainee", "学员姓名缺失".to_string()));
            }
            if record.station.is_none() {
                violations.push(err("station", "派驻站点缺失".to_string()));
            }
            if record.date.is_none() {
                violations.push(err("date", "日期缺失且无法展开".to_string()));
            }

            // 同一学员同日只能派驻一个站点
            if let (Some(trainee), Some(date)) = (&record.trainee, record.date) {
                if !seen.insert((trainee.clone(), date)) {
                    violations.push(err(
                        "trainee",
                        format!("学员 {} 在 {} 存在多条派驻记录", trainee, date),
                    ));
                }
            }
        }

        violations
    }

    fn validate_consistency(
        &self,
        stations: &[Sourced<Station>],
        roster: &[Sourced<Placement>],
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        // (站点, 日期) → 名册人数
        let mut rostered: HashMap<(&str, NaiveDate), i32> = HashMap::new();
        for (row, placement) in roster {
            let known = stations
                .iter()
                .any(|(_, s)| s.is_at(&placement.station, placement.date));
            if !known {
                violations.push(Self::violation(
                    SHEET_ROSTER,
                    *row,
                    DqLevel::Error,
                    "station",
                    format!(
                        "学员 {} 派驻的站点 {} 在 {} 不存在",
                        placement.trainee, placement.station, placement.date
                    ),
                ));
                continue;
            }
            *rostered
                .entry((placement.station.as_str(), placement.date))
                .or_insert(0) += 1;
        }

        for (row, station) in stations {
            let actual = rostered
                .get(&(station.name.as_str(), station.date))
                .copied()
                .unwrap_or(0);

            // 登记学员数与名册不一致
            if actual != station.trainee_count {
                violations.push(Self::violation(
                    SHEET_STATIONS,
                    *row,
                    DqLevel::Warning,
                    "trainee_count",
                    format!(
                        "站点 {} 在 {} 登记学员数 {}，名册实际 {}",
                        station.name, station.date, station.trainee_count, actual
                    ),
                ));
            }

            // 名册人数超出容量（仅提示）
            if actual > station.capacity {
                violations.push(Self::violation(
                    SHEET_STATIONS,
                    *row,
                    DqLevel::Info,
                    "capacity",
                    format!(
                        "站点 {} 在 {} 名册人数 {} 超出容量 {}",
                        station.name, station.date, actual, station.capacity
                    ),
                ));
            }
        }

        violations
    }
}
