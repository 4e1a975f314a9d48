// ==========================================
// 临床轮转排班系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 源表: 站点表 (dummy_wahana_data) / 名册表 (data_peserta)
// ==========================================

use crate::domain::import_record::{RawPlacementRecord, RawStationRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{RawRow, RecordMapper};
use chrono::NaiveDate;

// 标准字段（以源表列名为准）
pub const COL_STATION_NAME: &str = "Nama Wahana";
pub const COL_DATE: &str = "Tanggal";
pub const COL_CAPACITY: &str = "Kapasitas";
pub const COL_PATIENT_VOLUME: &str = "Total Pasien";
pub const COL_TRAINEE_COUNT: &str = "Peserta Didik";
pub const COL_TRAINEE: &str = "Nama Peserta";
pub const COL_PLACEMENT: &str = "Penempatan RS";

pub struct FieldMapper;

impl RecordMapper for FieldMapper {
    fn map_station(&self, row: &RawRow, row_number: usize) -> ImportResult<RawStationRecord> {
        Ok(RawStationRecord {
            name: self.get_string(row, COL_STATION_NAME),
            date: self.parse_date(row, COL_DATE, row_number)?,
            capacity: self.parse_i32(row, COL_CAPACITY, row_number)?,
            patient_volume: self.parse_i32(row, COL_PATIENT_VOLUME, row_number)?,
            trainee_count: self.parse_i32(row, COL_TRAINEE_COUNT, row_number)?,
            row_number,
        })
    }

    fn map_placement(&self, row: &RawRow, row_number: usize) -> ImportResult<RawPlacementRecord> {
        Ok(RawPlacementRecord {
            trainee: self.get_string(row, COL_TRAINEE),
            date: self.parse_date(row, COL_DATE, row_number)?,
            station: self.get_string(row, COL_PLACEMENT),
            row_number,
        })
    }
}

impl FieldMapper {
    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            COL_STATION_NAME => &["Nama Wahana", "station", "Station", "name"],
            COL_DATE => &["Tanggal", "date", "Date"],
            COL_CAPACITY => &["Kapasitas", "capacity"],
            COL_PATIENT_VOLUME => &["Total Pasien", "patient_volume", "patients"],
            COL_TRAINEE_COUNT => &["Peserta Didik", "trainee_count", "trainees"],
            COL_TRAINEE => &["Nama Peserta", "trainee", "Trainee"],
            COL_PLACEMENT => &["Penempatan RS", "station", "Station"],
            _ => &[],
        }
    }

    /// 提取字符串字段（空白视为缺失），按别名顺序取第一个非空值
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases = Self::aliases(key);
        let candidates: Vec<&str> = if aliases.is_empty() {
            vec![key]
        } else {
            aliases.to_vec()
        };

        for alias in candidates {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析整数（兼容 Excel 数值单元格 "5.0"）
    fn parse_i32(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<i32>> {
        let value = match self.get_string(row, key) {
            None => return Ok(None),
            Some(v) => v,
        };

        if let Ok(n) = value.parse::<i32>() {
            return Ok(Some(n));
        }

        match value.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                Ok(Some(f as i32))
            }
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为整数: {}", value),
            }),
        }
    }

    /// 解析日期
    ///
    /// 支持: YYYY-MM-DD / YYYYMMDD / DD/MM/YYYY / 带时间部分的 ISO 日期
    fn parse_date(
        &self,
        row: &RawRow,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_date_text(&value)
                .map(Some)
                .ok_or_else(|| ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value: value.clone(),
                }),
        }
    }
}

/// 文本日期解析
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            // "2024-03-01 00:00:00" / "2024-03-01T00:00:00"
            value
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
