use crate::domain::types::CountPolicy;
use serde::{Deserialize, Serialize};

/// 再平衡参数（引擎使用的已解析配置）
///
/// 来源：ConfigManager（global scope），缺省值沿用既有排班表口径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancerConfig {
    /// 目标 病人/学员 比（理想学员数 = round(病人数 / 该值)）
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,

    /// 超负荷阈值：负荷比 > 该值 判为 Overloaded
    #[serde(default = "default_overloaded_ratio")]
    pub overloaded_ratio: i32,

    /// 利用不足阈值：负荷比 < 该值 判为 Underutilized
    #[serde(default = "default_underutilized_ratio")]
    pub underutilized_ratio: i32,

    /// 站点人数与名册不一致时的处理口径
    #[serde(default)]
    pub count_policy: CountPolicy,
}

pub const DEFAULT_TARGET_RATIO: f64 = 13.0;
pub const DEFAULT_OVERLOADED_RATIO: i32 = 18;
pub const DEFAULT_UNDERUTILIZED_RATIO: i32 = 8;

fn default_target_ratio() -> f64 {
    DEFAULT_TARGET_RATIO
}

fn default_overloaded_ratio() -> i32 {
    DEFAULT_OVERLOADED_RATIO
}

fn default_underutilized_ratio() -> i32 {
    DEFAULT_UNDERUTILIZED_RATIO
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            target_ratio: DEFAULT_TARGET_RATIO,
            overloaded_ratio: DEFAULT_OVERLOADED_RATIO,
            underutilized_ratio: DEFAULT_UNDERUTILIZED_RATIO,
            count_policy: CountPolicy::Strict,
        }
    }
}

impl BalancerConfig {
    /// 覆写目标比
    pub fn with_target_ratio(mut self, target_ratio: f64) -> Self {
        self.target_ratio = target_ratio;
        self
    }

    /// 覆写分类阈值
    pub fn with_thresholds(mut self, underutilized_ratio: i32, overloaded_ratio: i32) -> Self {
        self.underutilized_ratio = underutilized_ratio;
        self.overloaded_ratio = overloaded_ratio;
        self
    }

    /// 覆写计数口径
    pub fn with_count_policy(mut self, count_policy: CountPolicy) -> Self {
        self.count_policy = count_policy;
        self
    }

    /// 参数自检
    ///
    /// # 返回
    /// - Err(String): 第一条不合法参数的说明
    pub fn check(&self) -> Result<(), String> {
        if !self.target_ratio.is_finite() || self.target_ratio <= 0.0 {
            return Err(format!("target_ratio 必须为正数: {}", self.target_ratio));
        }
        if self.underutilized_ratio > self.overloaded_ratio {
            return Err(format!(
                "阈值倒置: underutilized_ratio={} > overloaded_ratio={}",
                self.underutilized_ratio, self.overloaded_ratio
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let cfg: BalancerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, BalancerConfig::default());
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_check_rejects_bad_ratio() {
        assert!(BalancerConfig::default().with_target_ratio(0.0).check().is_err());
        assert!(BalancerConfig::default()
            .with_target_ratio(f64::NAN)
            .check()
            .is_err());
        assert!(BalancerConfig::default().with_thresholds(20, 10).check().is_err());
    }
}
