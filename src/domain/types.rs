// ==========================================
// 临床轮转排班系统 - 领域类型定义
// ==========================================
// 职责: 站点负荷状态、计数口径等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 站点负荷状态 (Station Status)
// ==========================================
// 由负荷比 (病人数/学员数) 推导,三分类
// 序列化格式与原始表格一致: Overloaded / Underutilized / Normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    Overloaded,    // 超负荷 (负荷比 > 上阈值)
    Underutilized, // 利用不足 (负荷比 < 下阈值)
    Normal,        // 正常
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationStatus::Overloaded => write!(f, "Overloaded"),
            StationStatus::Underutilized => write!(f, "Underutilized"),
            StationStatus::Normal => write!(f, "Normal"),
        }
    }
}

// ==========================================
// 学员计数口径 (Count Policy)
// ==========================================
// 站点表中的 trainee_count 与名册实际人数不一致时的处理方式
// 序列化格式: SCREAMING_SNAKE_CASE (与配置值一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountPolicy {
    Strict,           // 不一致即拒绝
    DeriveFromRoster, // 以名册为准重新计数
}

impl Default for CountPolicy {
    fn default() -> Self {
        CountPolicy::Strict
    }
}

impl fmt::Display for CountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountPolicy::Strict => write!(f, "STRICT"),
            CountPolicy::DeriveFromRoster => write!(f, "DERIVE_FROM_ROSTER"),
        }
    }
}

impl FromStr for CountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STRICT" => Ok(CountPolicy::Strict),
            "DERIVE_FROM_ROSTER" => Ok(CountPolicy::DeriveFromRoster),
            other => Err(format!("未知计数口径: {}", other)),
        }
    }
}
