// ==========================================
// 临床轮转排班系统 - 再平衡输入校验
// ==========================================
// 职责: 在任何修改之前检查站点/名册结构完整性
// 检查项:
// - 站点名称非空、容量 >= 1、病人数/学员数非负
// - (站点, 日期) 不重复
// - 名册: 姓名/站点非空、同日不重复、引用的站点存在
// - STRICT 口径下站点学员数与名册一致
// ==========================================

use crate::domain::placement::Placement;
use crate::domain::station::Station;
use crate::domain::types::CountPolicy;
use crate::engine::error::{RebalanceError, RebalanceResult};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// 校验指定日期的站点与名册
///
/// # 参数
/// - `stations`: 已按日期过滤的站点（输入顺序）
/// - `roster`: 完整名册（仅检查 date 当天的条目）
/// - `date`: 目标日期
/// - `count_policy`: 学员数一致性口径
///
/// # 返回
/// 第一条违反项；全部通过返回 Ok(())
pub fn validate_day(
    stations: &[Station],
    roster: &[Placement],
    date: NaiveDate,
    count_policy: CountPolicy,
) -> RebalanceResult<()> {
    // 1. 站点字段
    let mut station_names: HashSet<&str> = HashSet::new();
    for station in stations {
        if station.name.trim().is_empty() {
            return Err(RebalanceError::MissingField {
                field: "station.name".to_string(),
                context: format!("date={}", station.date),
            });
        }
        if station.capacity < 1 {
            return Err(RebalanceError::InvalidCapacity {
                station: station.name.clone(),
                date: station.date,
                capacity: station.capacity,
            });
        }
        check_non_negative(station, "patient_volume", station.patient_volume)?;
        check_non_negative(station, "trainee_count", station.trainee_count)?;

        if !station_names.insert(station.name.as_str()) {
            return Err(RebalanceError::DuplicateStation {
                station: station.name.clone(),
                date: station.date,
            });
        }
    }

    // 2. 名册字段（仅当天）
    let mut trainees: HashSet<&str> = HashSet::new();
    let mut rostered: HashMap<&str, i32> = HashMap::new();
    for placement in roster.iter().filter(|p| p.date == date) {
        if placement.trainee.trim().is_empty() {
            return Err(RebalanceError::MissingField {
                field: "placement.trainee".to_string(),
                context: format!("station={}, date={}", placement.station, date),
            });
        }
        if placement.station.trim().is_empty() {
            return Err(RebalanceError::MissingField {
                field: "placement.station".to_string(),
                context: format!("trainee={}, date={}", placement.trainee, date),
            });
        }
        if !trainees.insert(placement.trainee.as_str()) {
            return Err(RebalanceError::DuplicateTrainee {
                trainee: placement.trainee.clone(),
                date,
            });
        }
        if !station_names.contains(placement.station.as_str()) {
            return Err(RebalanceError::UnknownStation {
                trainee: placement.trainee.clone(),
                station: placement.station.clone(),
                date,
            });
        }
        *rostered.entry(placement.station.as_str()).or_insert(0) += 1;
    }

    // 3. 学员数一致性
    if count_policy == CountPolicy::Strict {
        for station in stations {
            let actual = rostered.get(station.name.as_str()).copied().unwrap_or(0);
            if actual != station.trainee_count {
                return Err(RebalanceError::TraineeCountMismatch {
                    station: station.name.clone(),
                    date: station.date,
                    recorded: station.trainee_count,
                    rostered: actual,
                });
            }
        }
    }

    Ok(())
}

fn check_non_negative(station: &Station, field: &str, value: i32) -> RebalanceResult<()> {
    if value < 0 {
        return Err(RebalanceError::NegativeValue {
            station: station.name.clone(),
            date: station.date,
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
