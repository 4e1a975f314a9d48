// ==========================================
// 测试数据构建器 - 站点 + 名册快照
// ==========================================

use chrono::NaiveDate;
use rotation_aps::domain::{Placement, RosterSnapshot, Station};
use std::io::Write;
use std::path::PathBuf;

/// 2024-03-<day>
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

// ==========================================
// RosterBuilder - 快照构建器
// ==========================================
// 学员名自动生成为 "<站点>-<序号>"，按站点添加顺序写入名册
pub struct RosterBuilder {
    stations: Vec<Station>,
    roster: Vec<Placement>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            roster: Vec::new(),
        }
    }

    /// 添加站点并生成 trainees 名学员
    pub fn station(
        mut self,
        name: &str,
        date: NaiveDate,
        capacity: i32,
        patients: i32,
        trainees: i32,
    ) -> Self {
        self.stations
            .push(Station::new(name, date, capacity, patients, trainees));
        for i in 1..=trainees {
            self.roster
                .push(Placement::new(format!("{}-{}", name, i), date, name));
        }
        self
    }

    /// 只添加站点（不生成名册）
    pub fn bare_station(
        mut self,
        name: &str,
        date: NaiveDate,
        capacity: i32,
        patients: i32,
        trainees: i32,
    ) -> Self {
        self.stations
            .push(Station::new(name, date, capacity, patients, trainees));
        self
    }

    /// 追加一条名册记录
    pub fn placement(mut self, trainee: &str, date: NaiveDate, station: &str) -> Self {
        self.roster.push(Placement::new(trainee, date, station));
        self
    }

    pub fn build(self) -> RosterSnapshot {
        RosterSnapshot::new(self.stations, self.roster)
    }
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 标准两站点场景
///
/// S1 {容量 10, 病人 200, 学员 5}, S2 {容量 10, 病人 26, 学员 5}
pub fn two_station_scenario(date: NaiveDate) -> RosterSnapshot {
    RosterBuilder::new()
        .station("S1", date, 10, 200, 5)
        .station("S2", date, 10, 26, 5)
        .build()
}

/// 在临时目录写入 CSV 文件
pub fn write_csv(dir: &tempfile::TempDir, file_name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}
