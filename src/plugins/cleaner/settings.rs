use chrono::Duration;
use serde::Serialize;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use tracing::warn;
use crate::error::Result;
use crate::utils::to_millis;

/// TTL 的有效范围（分钟），最长一周
pub const TTL_RANGE: RangeInclusive<u32> = 1..=10080;
/// 检查间隔的有效范围（分钟），0 表示停用
pub const CHECK_INTERVAL_RANGE: RangeInclusive<u32> = 0..=1440;

const TARGET_FOLDER_KEY: &str = "targetFolder";
const TTL_KEY: &str = "ttlMinutes";
const LEGACY_TTL_KEY: &str = "ttlMinites";
const CHECK_INTERVAL_KEY: &str = "checkInterval";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub target_folder: String,
    pub ttl_minutes: u32,
    pub check_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_folder: "tmp".to_string(),
            ttl_minutes: 1440, // 24 hours
            check_interval: 0,
        }
    }
}

impl Settings {
    /// 把持久化的数据逐字段合并到默认值上。缺失或无效的字段使用默认值
    pub fn from_persisted(data: Option<&Value>) -> Self {
        let mut settings = Self::default();
        let map = match data {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => return settings,
            Some(other) => {
                warn!("Ignoring persisted settings that are not an object: {}", other);
                return settings;
            }
        };

        if let Some(value) = map.get(TARGET_FOLDER_KEY) {
            match value.as_str() {
                Some(folder) => settings.target_folder = folder.to_string(),
                None => warn!("Invalid {} in persisted settings: {}", TARGET_FOLDER_KEY, value),
            }
        }
        if let Some(ttl) = read_field(map, &[TTL_KEY, LEGACY_TTL_KEY], &TTL_RANGE) {
            settings.ttl_minutes = ttl;
        }
        if let Some(interval) = read_field(map, &[CHECK_INTERVAL_KEY], &CHECK_INTERVAL_RANGE) {
            settings.check_interval = interval;
        }
        settings
    }

    pub fn to_persisted(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn is_enabled(&self) -> bool {
        self.check_interval > 0
    }

    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(to_millis(self.ttl_minutes) as i64)
    }

    /// 定时器周期，停用时为 `None`
    pub fn interval(&self) -> Option<std::time::Duration> {
        self.is_enabled()
            .then(|| std::time::Duration::from_millis(to_millis(self.check_interval)))
    }
}

/// 按顺序取第一个有效的键，无效的值跳过
fn read_field(map: &Map<String, Value>, keys: &[&str], range: &RangeInclusive<u32>) -> Option<u32> {
    keys.iter().find_map(|key| {
        let value = map.get(*key)?;
        let parsed = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| range.contains(n));
        if parsed.is_none() {
            warn!("Invalid {} in persisted settings: {}", key, value);
        }
        parsed
    })
}

/// 解析界面输入的整数，超出范围返回 `None`
pub fn parse_bounded(input: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| range.contains(n))
}
