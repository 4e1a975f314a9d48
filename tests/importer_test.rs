// ==========================================
// 快照导入集成测试
// ==========================================
// 测试范围: CSV 导入 → 分类、无日期名册展开、DQ 阻断/警告、
//           导入结果直接用于再平衡
// ==========================================

mod helpers;

use helpers::roster_builder::{d, write_csv};
use rotation_aps::config::{config_keys, ConfigManager};
use rotation_aps::domain::StationStatus;
use rotation_aps::engine::Rebalancer;
use rotation_aps::importer::{ImportError, SnapshotImporter};
use rotation_aps::logging;
use tempfile::TempDir;

const STATION_HEADER: &str = "Nama Wahana,Tanggal,Kapasitas,Total Pasien,Peserta Didik";

#[test]
fn test_import_csv_with_dated_roster() {
    logging::init_test();
    println!("\n=== CSV 导入（名册含日期） ===");
    let dir = TempDir::new().unwrap();
    let stations = write_csv(
        &dir,
        "stations.csv",
        &[
            STATION_HEADER,
            "S1,2024-03-01,10,200,2",
            "S2,2024-03-01,10,26,3",
        ],
    );
    let roster = write_csv(
        &dir,
        "roster.csv",
        &[
            "Nama Peserta,Tanggal,Penempatan RS",
            "a1,2024-03-01,S1",
            "a2,2024-03-01,S1",
            "b1,2024-03-01,S2",
            "b2,2024-03-01,S2",
            "b3,2024-03-01,S2",
        ],
    );

    let outcome = SnapshotImporter::default()
        .import_csv(&stations, &roster)
        .unwrap();

    assert_eq!(outcome.snapshot.stations.len(), 2);
    assert_eq!(outcome.snapshot.roster.len(), 5);
    assert_eq!(outcome.snapshot.available_dates(), vec![d(1)]);
    assert_eq!(
        outcome.snapshot.station("S1", d(1)).and_then(|s| s.status),
        Some(StationStatus::Overloaded)
    );
    assert_eq!(outcome.dq_report.summary.station_rows, 2);
    assert_eq!(outcome.dq_report.summary.roster_rows, 5);
    assert!(outcome.dq_report.violations.is_empty());

    println!("✓ batch_id={}", outcome.batch_id);
}

#[test]
fn test_import_csv_expands_undated_roster() {
    println!("\n=== CSV 导入（名册无日期，按站点日期展开） ===");
    let dir = TempDir::new().unwrap();
    let stations = write_csv(
        &dir,
        "stations.csv",
        &[
            STATION_HEADER,
            "S1,2024-03-02,10,200,1",
            "S2,2024-03-02,10,26,1",
            "S1,2024-03-01,10,200,1",
            "S2,2024-03-01,10,26,1",
        ],
    );
    let roster = write_csv(
        &dir,
        "roster.csv",
        &["Nama Peserta,Penempatan RS", "a1,S1", "b1,S2"],
    );

    let outcome = SnapshotImporter::default()
        .import_csv(&stations, &roster)
        .unwrap();

    assert_eq!(outcome.snapshot.roster.len(), 4);
    assert_eq!(outcome.snapshot.available_dates(), vec![d(1), d(2)]);
    for date in [d(1), d(2)] {
        assert_eq!(outcome.snapshot.trainees_at("S1", date), vec!["a1"]);
        assert_eq!(outcome.snapshot.trainees_at("S2", date), vec!["b1"]);
    }
}

#[test]
fn test_import_csv_blocks_on_data_quality_error() {
    let dir = TempDir::new().unwrap();
    let stations = write_csv(
        &dir,
        "stations.csv",
        &[STATION_HEADER, "S1,2024-03-01,10,200,1", "S1,2024-03-01,8,100,0"],
    );
    let roster = write_csv(&dir, "roster.csv", &["Nama Peserta,Penempatan RS", "a1,S1"]);

    let result = SnapshotImporter::default().import_csv(&stations, &roster);

    match result {
        Err(ImportError::DataQuality { blocked, first }) => {
            println!("  阻断: {} 条，首条 {}", blocked, first);
            assert_eq!(blocked, 1);
            assert!(first.contains("S1"));
        }
        other => panic!("期望 DataQuality，实际 {:?}", other),
    }
}

#[test]
fn test_import_csv_unknown_station_blocks() {
    let dir = TempDir::new().unwrap();
    let stations = write_csv(&dir, "stations.csv", &[STATION_HEADER, "S1,2024-03-01,10,200,1"]);
    let roster = write_csv(
        &dir,
        "roster.csv",
        &["Nama Peserta,Tanggal,Penempatan RS", "a1,2024-03-01,S9"],
    );

    let err = SnapshotImporter::default()
        .import_csv(&stations, &roster)
        .unwrap_err();

    assert_eq!(err.code(), "DATA_QUALITY");
}

#[test]
fn test_unknown_station_reports_source_row_for_undated_roster() {
    let dir = TempDir::new().unwrap();
    let stations = write_csv(
        &dir,
        "stations.csv",
        &[STATION_HEADER, "S1,2024-03-01,10,200,1", "S1,2024-03-02,10,200,1"],
    );
    let roster = write_csv(
        &dir,
        "roster.csv",
        &["Nama Peserta,Penempatan RS", "a1,S1", "a2,S9"],
    );

    let result = SnapshotImporter::default().import_csv(&stations, &roster);

    match result {
        Err(ImportError::DataQuality { blocked, first }) => {
            // a2 展开到 2 个日期，均指向名册第 2 行
            assert_eq!(blocked, 2);
            assert!(first.contains("第 2 行"), "{}", first);
        }
        other => panic!("期望 DataQuality，实际 {:?}", other),
    }
}

#[test]
fn test_import_csv_count_mismatch_is_warning() {
    let dir = TempDir::new().unwrap();
    let stations = write_csv(&dir, "stations.csv", &[STATION_HEADER, "S1,2024-03-01,10,200,3"]);
    let roster = write_csv(&dir, "roster.csv", &["Nama Peserta,Penempatan RS", "a1,S1"]);

    let outcome = SnapshotImporter::default()
        .import_csv(&stations, &roster)
        .unwrap();

    assert_eq!(outcome.dq_report.summary.blocked, 0);
    assert_eq!(outcome.dq_report.summary.warning, 1);
}

#[test]
fn test_import_missing_file() {
    let dir = TempDir::new().unwrap();
    let roster = write_csv(&dir, "roster.csv", &["Nama Peserta,Penempatan RS"]);

    let err = SnapshotImporter::default()
        .import_csv(dir.path().join("missing.csv"), &roster)
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let err = SnapshotImporter::default()
        .import_workbook(dir.path().join("missing.xlsx"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_imported_snapshot_feeds_rebalancer() {
    println!("\n=== 导入 → 再平衡 ===");
    let dir = TempDir::new().unwrap();
    let stations = write_csv(
        &dir,
        "stations.csv",
        &[
            "station,date,capacity,patient_volume,trainee_count",
            "S1,20240301,10,200,5",
            "S2,20240301,10,26,5",
        ],
    );
    let roster = write_csv(
        &dir,
        "roster.csv",
        &[
            "trainee,station",
            "a1,S1",
            "a2,S1",
            "a3,S1",
            "a4,S1",
            "a5,S1",
            "b1,S2",
            "b2,S2",
            "b3,S2",
            "b4,S2",
            "b5,S2",
        ],
    );

    let imported = SnapshotImporter::default()
        .import_csv(&stations, &roster)
        .unwrap();
    let outcome = Rebalancer::default()
        .rebalance(&imported.snapshot.stations, &imported.snapshot.roster, d(1))
        .unwrap();

    let moved: Vec<&str> = outcome.transfers.iter().map(|t| t.trainee.as_str()).collect();
    assert_eq!(moved, vec!["b1", "b2", "b3"]);
    println!("✓ 调动 {:?}", moved);
}

#[test]
fn test_importer_thresholds_from_config() {
    let config = ConfigManager::new();
    config
        .update_config(config_keys::OVERLOADED_RATIO, "100")
        .unwrap();
    let importer = SnapshotImporter::new(&config).unwrap();

    let dir = TempDir::new().unwrap();
    let stations = write_csv(&dir, "stations.csv", &[STATION_HEADER, "S1,2024-03-01,10,200,2"]);
    let roster = write_csv(&dir, "roster.csv", &["Nama Peserta,Penempatan RS", "a1,S1", "a2,S1"]);

    let outcome = importer.import_csv(&stations, &roster).unwrap();

    // 200 / 2 = 100，不超过阈值 100
    assert_eq!(outcome.snapshot.stations[0].status, Some(StationStatus::Normal));
}
