// ==========================================
// 临床轮转排班系统 - 名册日期展开
// ==========================================
// 职责: 名册缺少日期列时，将每条派驻复制到站点表中出现的每个日期
// 顺序: 同一日期内保持名册原始顺序（再平衡按名册顺序挑选调动者）
// ==========================================

use crate::domain::import_record::{RawPlacementRecord, RawStationRecord};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct RosterExpander;

impl RosterExpander {
    /// 站点表中出现的日期（升序去重）
    pub fn station_dates(&self, stations: &[RawStationRecord]) -> Vec<NaiveDate> {
        stations
            .iter()
            .filter_map(|s| s.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 展开无日期的派驻记录
    ///
    /// # 参数
    /// - records: 名册行
    /// - dates: 可用日期（为空时无日期记录保持原样，由 DQ 校验报错）
    ///
    /// # 返回
    /// - 展开后的名册行（行号沿用源行）
    pub fn expand(
        &self,
        records: Vec<RawPlacementRecord>,
        dates: &[NaiveDate],
    ) -> Vec<RawPlacementRecord> {
        if dates.is_empty() {
            return records;
        }

        let mut expanded = Vec::with_capacity(records.len());
        let mut undated = 0usize;

        for record in records {
            if record.date.is_some() {
                expanded.push(record);
                continue;
            }
            undated += 1;
            for date in dates {
                expanded.push(RawPlacementRecord {
                    date: Some(*date),
                    ..record.clone()
                });
            }
        }

        if undated > 0 {
            debug!(undated, dates = dates.len(), "名册无日期记录已按站点日期展开");
        }

        expanded
    }
}
