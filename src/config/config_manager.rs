// ==========================================
// 临床轮转排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（global scope），可从 JSON 文件/快照加载
// ==========================================

use crate::config::balancer_config::{
    BalancerConfig, DEFAULT_OVERLOADED_RATIO, DEFAULT_TARGET_RATIO, DEFAULT_UNDERUTILIZED_RATIO,
};
use crate::domain::types::CountPolicy;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("锁获取失败: {0}")]
    LockError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    values: RwLock<HashMap<String, String>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// 从 JSON 对象字符串创建
    ///
    /// # 参数
    /// - json: 形如 {"rebalance.target_ratio": 13, "rebalance.count_policy": "STRICT"}
    ///
    /// # 说明
    /// 非字符串值（数字/布尔）按其 JSON 文本保存
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let manager = Self::new();
        manager.restore_config_from_snapshot(json)?;
        Ok(manager)
    }

    /// 从 JSON 文件创建
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入（覆写）单个配置值
    pub fn update_config(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        values.insert(key.trim().to_string(), value.trim().to_string());
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式，key 有序）
    ///
    /// # 用途
    /// - 在再平衡结果中记录所用参数
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self
            .values
            .read()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        let ordered: BTreeMap<&String, &String> = values.iter().collect();
        serde_json::to_string(&ordered).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// 同名 key 会被覆盖，其他 key 保持不变
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let parsed: HashMap<String, JsonValue> = serde_json::from_str(snapshot_json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let mut values = self
            .values
            .write()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let mut count = 0;
        for (key, value) in parsed {
            let text = match value {
                JsonValue::String(s) => s,
                JsonValue::Null => continue,
                other => other.to_string(),
            };
            values.insert(key, text);
            count += 1;
        }
        Ok(count)
    }

    // ===== 再平衡配置 =====

    /// 获取目标 病人/学员 比
    ///
    /// # 默认值
    /// - 13
    pub fn get_target_ratio(&self) -> ConfigResult<f64> {
        let value = self.get_config_or_default(
            config_keys::TARGET_RATIO,
            &DEFAULT_TARGET_RATIO.to_string(),
        )?;
        let ratio = parse_value::<f64>(config_keys::TARGET_RATIO, &value)?;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::TARGET_RATIO.to_string(),
                value,
                message: "必须为正数".to_string(),
            });
        }
        Ok(ratio)
    }

    /// 获取计数口径
    ///
    /// # 默认值
    /// - STRICT
    pub fn get_count_policy(&self) -> ConfigResult<CountPolicy> {
        let value = self.get_config_or_default(config_keys::COUNT_POLICY, "STRICT")?;
        value
            .parse::<CountPolicy>()
            .map_err(|message| ConfigError::InvalidValue {
                key: config_keys::COUNT_POLICY.to_string(),
                value: value.clone(),
                message,
            })
    }

    // ===== 负荷分类配置 =====

    /// 获取超负荷阈值（默认 18）
    pub fn get_overloaded_ratio(&self) -> ConfigResult<i32> {
        let value = self.get_config_or_default(
            config_keys::OVERLOADED_RATIO,
            &DEFAULT_OVERLOADED_RATIO.to_string(),
        )?;
        parse_value::<i32>(config_keys::OVERLOADED_RATIO, &value)
    }

    /// 获取利用不足阈值（默认 8）
    pub fn get_underutilized_ratio(&self) -> ConfigResult<i32> {
        let value = self.get_config_or_default(
            config_keys::UNDERUTILIZED_RATIO,
            &DEFAULT_UNDERUTILIZED_RATIO.to_string(),
        )?;
        parse_value::<i32>(config_keys::UNDERUTILIZED_RATIO, &value)
    }

    // ===== 导入配置 =====

    /// 站点表 sheet 名（默认 dummy_wahana_data）
    pub fn get_station_sheet(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::STATION_SHEET, "dummy_wahana_data")
    }

    /// 名册表 sheet 名（默认 data_peserta）
    pub fn get_roster_sheet(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::ROSTER_SHEET, "data_peserta")
    }

    /// 汇总为引擎使用的 BalancerConfig
    pub fn balancer_config(&self) -> ConfigResult<BalancerConfig> {
        let config = BalancerConfig {
            target_ratio: self.get_target_ratio()?,
            overloaded_ratio: self.get_overloaded_ratio()?,
            underutilized_ratio: self.get_underutilized_ratio()?,
            count_policy: self.get_count_policy()?,
        };
        config.check().map_err(|message| ConfigError::InvalidValue {
            key: format!(
                "{},{}",
                config_keys::UNDERUTILIZED_RATIO,
                config_keys::OVERLOADED_RATIO
            ),
            value: format!("{},{}", config.underutilized_ratio, config.overloaded_ratio),
            message,
        })?;
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 再平衡
    pub const TARGET_RATIO: &str = "rebalance.target_ratio";
    pub const COUNT_POLICY: &str = "rebalance.count_policy";

    // 负荷分类
    pub const OVERLOADED_RATIO: &str = "metrics.overloaded_ratio";
    pub const UNDERUTILIZED_RATIO: &str = "metrics.underutilized_ratio";

    // 导入
    pub const STATION_SHEET: &str = "import.station_sheet";
    pub const ROSTER_SHEET: &str = "import.roster_sheet";
}
