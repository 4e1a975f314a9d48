// ==========================================
// Rebalancer 集成测试
// ==========================================
// 测试范围: 贪心调动顺序、人数守恒、无操作、边界夹取、
//           输入校验、其他日期隔离、调用方快照不变
// ==========================================

mod helpers;

use helpers::roster_builder::*;
use rotation_aps::config::BalancerConfig;
use rotation_aps::domain::{CountPolicy, OccupancyView, RosterSnapshot, Station, StationStatus};
use rotation_aps::engine::{RebalanceError, Rebalancer};
use rotation_aps::logging;

// ==========================================
// 场景1: 标准两站点
// ==========================================

#[test]
fn test_two_station_scenario() {
    logging::init_test();
    println!("\n=== 场景1: 标准两站点 ===");
    let date = d(1);
    let snapshot = two_station_scenario(date);
    let rebalancer = Rebalancer::default();

    let outcome = rebalancer
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    // S1 理想 = min(round(200/13)=15, 10) = 10，缺 5
    // S2 理想 = round(26/13) = 2，盈余 3
    assert_eq!(outcome.targets[0].ideal, 10);
    assert_eq!(outcome.targets[0].delta, -5);
    assert_eq!(outcome.targets[1].ideal, 2);
    assert_eq!(outcome.targets[1].delta, 3);

    let moved: Vec<&str> = outcome.transfers.iter().map(|t| t.trainee.as_str()).collect();
    assert_eq!(moved, vec!["S2-1", "S2-2", "S2-3"]);
    assert!(outcome
        .transfers
        .iter()
        .all(|t| t.from == "S2" && t.to == "S1" && t.date == date));

    assert_eq!(outcome.stations_after[0].trainee_count, 8);
    assert_eq!(outcome.stations_after[1].trainee_count, 2);
    assert_eq!(outcome.remaining_deficits(), vec![("S1", 2)]);

    // 调整前后分类: S1 200/5=40 → 200/8=25 仍超负荷；S2 26/5=5 → 26/2=13 正常
    assert_eq!(outcome.stations_before[0].status, Some(StationStatus::Overloaded));
    assert_eq!(outcome.stations_after[0].status, Some(StationStatus::Overloaded));
    assert_eq!(outcome.stations_before[1].status, Some(StationStatus::Underutilized));
    assert_eq!(outcome.stations_after[1].status, Some(StationStatus::Normal));
    assert_eq!(outcome.stations_after[1].load_ratio, 13);

    println!("✓ 调动 {} 人，S1 剩余缺口 2", outcome.transfers.len());
}

// ==========================================
// 场景2: 贪心顺序（先取输入顺序靠前的盈余站点）
// ==========================================

#[test]
fn test_greedy_order_uses_surplus_in_input_order() {
    println!("\n=== 场景2: 贪心顺序 ===");
    let date = d(1);
    // D 理想 10，现有 5，缺 5；A 盈余 3；B 盈余 10
    let snapshot = RosterBuilder::new()
        .station("D", date, 20, 130, 5)
        .station("A", date, 10, 26, 5)
        .station("B", date, 20, 26, 12)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    let sources: Vec<&str> = outcome.transfers.iter().map(|t| t.from.as_str()).collect();
    assert_eq!(sources, vec!["A", "A", "A", "B", "B"]);

    let counts: Vec<i32> = outcome.stations_after.iter().map(|s| s.trainee_count).collect();
    assert_eq!(counts, vec![10, 2, 10]);
    assert!(outcome.remaining_deficits().is_empty());

    println!("✓ 先从 A 调 3 人，再从 B 调 2 人");
}

#[test]
fn test_deficits_served_in_input_order() {
    let date = d(1);
    // X、Y 各缺 2，唯一盈余站点 Z 只有 3 人可调
    let snapshot = RosterBuilder::new()
        .station("X", date, 10, 52, 2)
        .station("Y", date, 10, 52, 2)
        .station("Z", date, 10, 13, 4)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    let targets: Vec<&str> = outcome.transfers.iter().map(|t| t.to.as_str()).collect();
    assert_eq!(targets, vec!["X", "X", "Y"]);
    assert_eq!(outcome.remaining_deficits(), vec![("Y", 1)]);
}

#[test]
fn test_surplus_taken_in_roster_order_when_interleaved() {
    let date = d(1);
    // 盈余站点 S 的派驻与其他站点、其他日期交错排列
    let snapshot = RosterBuilder::new()
        .bare_station("D", date, 10, 52, 1) // 理想 4，缺 3
        .bare_station("S", date, 10, 13, 4) // 理想 1，盈余 3
        .bare_station("S", d(2), 10, 13, 1)
        .bare_station("D", d(2), 10, 52, 1)
        .placement("s1", date, "S")
        .placement("x1", d(2), "S")
        .placement("d1", date, "D")
        .placement("s2", date, "S")
        .placement("x2", d(2), "D")
        .placement("s3", date, "S")
        .placement("s4", date, "S")
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    let moved: Vec<&str> = outcome.transfers.iter().map(|t| t.trainee.as_str()).collect();
    assert_eq!(moved, vec!["s1", "s2", "s3"]);

    let counts: Vec<i32> = outcome.stations_after.iter().map(|s| s.trainee_count).collect();
    assert_eq!(counts, vec![4, 1]);

    let snapshot_after = RosterSnapshot::new(
        outcome.stations_after.clone(),
        outcome.roster.clone(),
    );
    assert_eq!(snapshot_after.trainees_at("S", date), vec!["s4"]);
    assert_eq!(snapshot_after.trainees_at("S", d(2)), vec!["x1"]);
}

// ==========================================
// 场景3: 人数守恒
// ==========================================

#[test]
fn test_conservation_of_trainees() {
    println!("\n=== 场景3: 人数守恒 ===");
    let date = d(1);
    let snapshot = RosterBuilder::new()
        .station("A", date, 12, 300, 3)
        .station("B", date, 8, 10, 7)
        .station("C", date, 6, 90, 1)
        .station("D", date, 9, 0, 6)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    let before: i32 = outcome.stations_before.iter().map(|s| s.trainee_count).sum();
    let after: i32 = outcome.stations_after.iter().map(|s| s.trainee_count).sum();
    assert_eq!(before, after);
    assert_eq!(outcome.roster.len(), snapshot.roster.len());

    // 每名学员仍只出现一次
    let mut names: Vec<&str> = outcome.roster.iter().map(|p| p.trainee.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), snapshot.roster.len());

    // 调整后计数与名册一致
    for station in &outcome.stations_after {
        let rostered = outcome
            .roster
            .iter()
            .filter(|p| p.is_at(&station.name, date))
            .count() as i32;
        assert_eq!(rostered, station.trainee_count, "站点 {}", station.name);
    }

    println!("✓ 总人数 {} 保持不变", after);
}

// ==========================================
// 场景4: 已平衡 → 无操作
// ==========================================

#[test]
fn test_no_op_when_balanced() {
    let date = d(1);
    let snapshot = RosterBuilder::new()
        .station("A", date, 5, 26, 2)
        .station("B", date, 5, 39, 3)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    assert!(!outcome.has_transfers());
    assert_eq!(outcome.roster, snapshot.roster);
    assert!(outcome.targets.iter().all(|t| t.delta == 0));
}

#[test]
fn test_only_deficits_no_surplus() {
    let date = d(1);
    let snapshot = RosterBuilder::new()
        .station("A", date, 10, 130, 2)
        .station("B", date, 10, 130, 4)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    assert!(outcome.transfers.is_empty());
    assert_eq!(outcome.remaining_deficits(), vec![("A", 8), ("B", 6)]);
}

// ==========================================
// 场景5: 边界夹取
// ==========================================

#[test]
fn test_ideal_clamped_to_capacity_and_minimum_one() {
    let date = d(1);
    // A: 病人 0 → 理想 1，盈余 2；B: 理想受容量 3 限制，缺 2
    let snapshot = RosterBuilder::new()
        .station("A", date, 5, 0, 3)
        .station("B", date, 3, 1000, 1)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    assert_eq!(outcome.targets[0].ideal, 1);
    assert_eq!(outcome.targets[1].ideal, 3);
    assert_eq!(outcome.transfers.len(), 2);
    assert_eq!(outcome.stations_after[0].trainee_count, 1);
    assert_eq!(outcome.stations_after[1].trainee_count, 3);
}

#[test]
fn test_rounding_half_away_from_zero() {
    let station = Station::new("A", d(1), 10, 5, 0);
    // 5 / 2 = 2.5 → 3
    assert_eq!(station.ideal_trainees(2.0), 3);
    // 200 / 13 = 15.38 → 15，夹到容量 10
    assert_eq!(Station::new("B", d(1), 10, 200, 0).ideal_trainees(13.0), 10);
}

// ==========================================
// 场景6: 隔离性（调用方快照 / 其他日期）
// ==========================================

#[test]
fn test_caller_snapshot_unchanged() {
    let date = d(1);
    let snapshot = two_station_scenario(date);
    let original = snapshot.clone();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    assert!(outcome.has_transfers());
    assert_eq!(snapshot, original);
}

#[test]
fn test_other_dates_untouched() {
    let snapshot = RosterBuilder::new()
        .station("S1", d(1), 10, 200, 5)
        .station("S2", d(1), 10, 26, 5)
        .station("S1", d(2), 10, 200, 1)
        .station("S2", d(2), 10, 26, 6)
        .build();

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, d(1))
        .unwrap();

    // 只包含目标日期站点
    assert_eq!(outcome.stations_after.len(), 2);
    assert!(outcome.stations_after.iter().all(|s| s.date == d(1)));

    let other_before: Vec<_> = snapshot.roster.iter().filter(|p| p.date == d(2)).collect();
    let other_after: Vec<_> = outcome.roster.iter().filter(|p| p.date == d(2)).collect();
    assert_eq!(other_before, other_after);
    assert_eq!(outcome.transfers_for(d(2)).len(), 0);
}

// ==========================================
// 场景7: 输入校验（无部分结果）
// ==========================================

#[test]
fn test_strict_count_mismatch_rejected() {
    let date = d(1);
    let snapshot = RosterBuilder::new()
        .bare_station("S1", date, 10, 200, 4)
        .placement("t1", date, "S1")
        .build();

    let err = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap_err();

    assert_eq!(
        err,
        RebalanceError::TraineeCountMismatch {
            station: "S1".to_string(),
            date,
            recorded: 4,
            rostered: 1,
        }
    );
    assert_eq!(err.code(), "TRAINEE_COUNT_MISMATCH");
}

#[test]
fn test_derive_from_roster_recounts() {
    let date = d(1);
    let snapshot = RosterBuilder::new()
        .bare_station("S1", date, 10, 200, 9)
        .bare_station("S2", date, 10, 26, 0)
        .placement("t1", date, "S1")
        .placement("t2", date, "S2")
        .placement("t3", date, "S2")
        .placement("t4", date, "S2")
        .build();
    let config = BalancerConfig::default().with_count_policy(CountPolicy::DeriveFromRoster);

    let outcome = Rebalancer::new(config)
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    assert_eq!(outcome.stations_before[0].trainee_count, 1);
    assert_eq!(outcome.stations_before[1].trainee_count, 3);
    // S2 理想 2，盈余 1 → S1
    assert_eq!(outcome.transfers.len(), 1);
    assert_eq!(outcome.transfers[0].trainee, "t2");
}

#[test]
fn test_invalid_inputs_rejected() {
    let date = d(1);
    let rebalancer = Rebalancer::default();

    let cases = vec![
        (
            RosterBuilder::new().station("S1", date, 0, 10, 0).build(),
            "INVALID_CAPACITY",
        ),
        (
            RosterBuilder::new().bare_station("S1", date, 5, -1, 0).build(),
            "NEGATIVE_VALUE",
        ),
        (
            RosterBuilder::new()
                .station("S1", date, 5, 10, 0)
                .station("S1", date, 5, 10, 0)
                .build(),
            "DUPLICATE_STATION",
        ),
        (
            RosterBuilder::new()
                .bare_station("S1", date, 5, 10, 2)
                .placement("t1", date, "S1")
                .placement("t1", date, "S1")
                .build(),
            "DUPLICATE_TRAINEE",
        ),
        (
            RosterBuilder::new()
                .bare_station("S1", date, 5, 10, 1)
                .placement("t1", date, "S9")
                .build(),
            "UNKNOWN_STATION",
        ),
        (
            RosterBuilder::new()
                .bare_station("S1", date, 5, 10, 1)
                .placement("", date, "S1")
                .build(),
            "MISSING_FIELD",
        ),
    ];

    for (snapshot, expected) in cases {
        let err = rebalancer
            .rebalance(&snapshot.stations, &snapshot.roster, date)
            .unwrap_err();
        println!("  {} → {}", expected, err);
        assert_eq!(err.code(), expected);
    }
}

// ==========================================
// 场景8: 空日期 / 孤立名册 / 参数非法
// ==========================================

#[test]
fn test_empty_date_returns_empty_outcome() {
    let snapshot = two_station_scenario(d(1));

    let outcome = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, d(9))
        .unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.transfers.is_empty());
    assert_eq!(outcome.date, d(9));
}

#[test]
fn test_orphan_roster_rejected() {
    let snapshot = RosterBuilder::new().placement("t1", d(3), "S1").build();

    let err = Rebalancer::default()
        .rebalance(&snapshot.stations, &snapshot.roster, d(3))
        .unwrap_err();

    assert_eq!(
        err,
        RebalanceError::OrphanRoster {
            date: d(3),
            placements: 1
        }
    );
}

#[test]
fn test_target_ratio_override_changes_ideal() {
    let date = d(1);
    let snapshot = two_station_scenario(date);

    let outcome = Rebalancer::new(BalancerConfig::default().with_target_ratio(40.0))
        .rebalance(&snapshot.stations, &snapshot.roster, date)
        .unwrap();

    // S1 理想 5（无缺口），S2 理想 1（盈余 4，无人需要）
    assert_eq!(outcome.targets[0].ideal, 5);
    assert_eq!(outcome.targets[1].ideal, 1);
    assert!(outcome.transfers.is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let snapshot = two_station_scenario(d(1));
    let config = BalancerConfig::default().with_thresholds(20, 10);

    let err = Rebalancer::new(config)
        .rebalance(&snapshot.stations, &snapshot.roster, d(1))
        .unwrap_err();

    assert_eq!(err.code(), "INVALID_CONFIG");
}
