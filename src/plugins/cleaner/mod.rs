use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::error::CleanerError;
use crate::notice::Notifier;
use crate::plugin::Plugin;
use crate::vault::Vault;

mod editor;
mod pass;
mod scheduler;
mod settings;
mod store;

pub use editor::SettingsEditor;
pub use pass::{run_cleanup, CleanupReport, MARKDOWN_EXTENSION};
pub use scheduler::CleanupScheduler;
pub use settings::{parse_bounded, Settings, CHECK_INTERVAL_RANGE, TTL_RANGE};
pub use store::{load_settings, save_settings, JsonFileSettingsStore, MemorySettingsStore, SettingsStore};

/// 定期删除目标目录中过期 Markdown 文件的插件
pub struct AutoTempCleanerPlugin {
    settings: Arc<RwLock<Settings>>,
    store: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<CleanupScheduler>,
}

impl AutoTempCleanerPlugin {
    pub fn new(
        vault: Arc<dyn Vault>,
        store: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let scheduler = Arc::new(CleanupScheduler::new(settings.clone(), vault, notifier.clone()));
        Self {
            settings,
            store,
            notifier,
            scheduler,
        }
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub fn scheduler(&self) -> Arc<CleanupScheduler> {
        self.scheduler.clone()
    }

    /// 设置界面使用的编辑入口
    pub fn editor(&self) -> SettingsEditor {
        SettingsEditor::new(
            self.settings.clone(),
            self.store.clone(),
            self.scheduler.clone(),
            self.notifier.clone(),
        )
    }
}

#[async_trait]
impl Plugin for AutoTempCleanerPlugin {
    fn name(&self) -> &str {
        "auto-temp-cleaner"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    async fn init(&self) -> Result<(), CleanerError> {
        let loaded = load_settings(self.store.as_ref()).await;
        debug!("Loaded settings: {:?}", loaded);
        *self.settings.write().await = loaded;
        self.scheduler.start_interval().await;
        info!("Auto Temp Cleaner initialized");
        Ok(())
    }

    async fn cleanup(&self) -> Result<(), CleanerError> {
        self.scheduler.stop().await;
        Ok(())
    }

    /// 启用时定时器必须在运行，停用时不应有定时器
    async fn health_check(&self) -> Result<bool, CleanerError> {
        let enabled = self.settings.read().await.is_enabled();
        Ok(self.scheduler.is_armed().await == enabled)
    }
}
