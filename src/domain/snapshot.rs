// ==========================================
// 临床轮转排班系统 - 名册快照
// ==========================================
// 用途: 导入层输出，调用方持有；引擎只读借用
// ==========================================

use crate::domain::placement::Placement;
use crate::domain::station::Station;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// RosterSnapshot - 站点 + 名册（全部日期）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub stations: Vec<Station>,
    pub roster: Vec<Placement>,
}

impl RosterSnapshot {
    pub fn new(stations: Vec<Station>, roster: Vec<Placement>) -> Self {
        Self { stations, roster }
    }

    /// 站点表中出现的全部日期（升序去重）
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.stations
            .iter()
            .map(|s| s.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 指定日期的站点（保持输入顺序）
    pub fn stations_on(&self, date: NaiveDate) -> Vec<&Station> {
        self.stations.iter().filter(|s| s.date == date).collect()
    }

    /// 指定日期的排位（保持名册顺序）
    pub fn placements_on(&self, date: NaiveDate) -> Vec<&Placement> {
        self.roster.iter().filter(|p| p.date == date).collect()
    }

    /// 某站点某日的学员姓名（名册顺序）
    pub fn trainees_at(&self, station: &str, date: NaiveDate) -> Vec<&str> {
        self.roster
            .iter()
            .filter(|p| p.is_at(station, date))
            .map(|p| p.trainee.as_str())
            .collect()
    }

    /// 查找站点
    pub fn station(&self, name: &str, date: NaiveDate) -> Option<&Station> {
        self.stations.iter().find(|s| s.is_at(name, date))
    }
}
