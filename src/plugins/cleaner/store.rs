use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use crate::error::Result;
use super::settings::Settings;

/// 宿主的设置持久化机制，读写不透明的 JSON 数据
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// 首次运行时没有数据，返回 `None`
    async fn load_data(&self) -> Result<Option<Value>>;

    async fn save_data(&self, data: Value) -> Result<()>;
}

/// 读取设置，永不失败
pub async fn load_settings(store: &dyn SettingsStore) -> Settings {
    match store.load_data().await {
        Ok(data) => Settings::from_persisted(data.as_ref()),
        Err(e) => {
            warn!("Failed to read persisted settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

pub async fn save_settings(store: &dyn SettingsStore, settings: &Settings) -> Result<()> {
    debug!("Saving settings: {:?}", settings);
    store.save_data(settings.to_persisted()?).await
}

/// 保存为磁盘上的 JSON 文件
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn load_data(&self) -> Result<Option<Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save_data(&self, data: Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&data)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    data: RwLock<Option<Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: RwLock::new(Some(data)),
        }
    }

    pub async fn data(&self) -> Option<Value> {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load_data(&self) -> Result<Option<Value>> {
        Ok(self.data.read().await.clone())
    }

    async fn save_data(&self, data: Value) -> Result<()> {
        *self.data.write().await = Some(data);
        Ok(())
    }
}
