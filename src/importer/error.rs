// ==========================================
// 临床轮转排班系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("工作表不存在: {0}")]
    SheetNotFound(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD / YYYYMMDD / DD/MM/YYYY，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 数据质量错误 =====
    #[error("数据质量校验未通过: {blocked} 条阻断级问题，首条: {first}")]
    DataQuality { blocked: usize, first: String },
}

impl ImportError {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::FileNotFound(_) => "FILE_NOT_FOUND",
            ImportError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ImportError::FileReadError(_) => "FILE_READ_ERROR",
            ImportError::ExcelParseError(_) => "EXCEL_PARSE_ERROR",
            ImportError::SheetNotFound(_) => "SHEET_NOT_FOUND",
            ImportError::CsvParseError(_) => "CSV_PARSE_ERROR",
            ImportError::TypeConversionError { .. } => "TYPE_CONVERSION_ERROR",
            ImportError::DateFormatError { .. } => "DATE_FORMAT_ERROR",
            ImportError::DataQuality { .. } => "DATA_QUALITY",
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
