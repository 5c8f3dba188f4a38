use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::error::{CleanerError, Result};
use crate::logger::DEFAULT_LOG_FILTER;

/// 宿主程序配置（不是插件设置，插件设置见 `settings`）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault 根目录
    pub vault_root: PathBuf,
    /// 插件设置的持久化文件
    pub data_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // 首先尝试从环境变量加载
        if let Ok(config_path) = std::env::var("CONFIG_PATH") {
            return Self::from_file(&config_path);
        }

        // 否则使用默认配置
        Ok(Self::default())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CleanerError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_root: "./vault".into(),
            data_file: "./.auto-temp-cleaner/data.json".into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(r#"vault_root = "/srv/notes""#).unwrap();
        assert_eq!(config.vault_root, PathBuf::from("/srv/notes"));
        assert_eq!(config.data_file, Config::default().data_file);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("vault_root = [").unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaner.toml");
        std::fs::write(&path, "data_file = \"state/data.json\"\nlog_filter = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("state/data.json"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.vault_root, PathBuf::from("./vault"));
    }
}
