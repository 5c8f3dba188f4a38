use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::error::Result;
use crate::notice::Notifier;
use super::scheduler::CleanupScheduler;
use super::settings::{parse_bounded, Settings, CHECK_INTERVAL_RANGE, TTL_RANGE};
use super::store::{save_settings, SettingsStore};

/// 设置界面的编辑入口
///
/// 数值越界或无法解析时静默拒绝：不修改、不保存，返回 `Ok(false)`。
pub struct SettingsEditor {
    settings: Arc<RwLock<Settings>>,
    store: Arc<dyn SettingsStore>,
    scheduler: Arc<CleanupScheduler>,
    notifier: Arc<dyn Notifier>,
}

impl SettingsEditor {
    pub fn new(
        settings: Arc<RwLock<Settings>>,
        store: Arc<dyn SettingsStore>,
        scheduler: Arc<CleanupScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            store,
            scheduler,
            notifier,
        }
    }

    pub async fn current(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub async fn set_target_folder(&self, value: &str) -> Result<()> {
        let snapshot = {
            let mut settings = self.settings.write().await;
            settings.target_folder = value.trim().to_string();
            settings.clone()
        };
        debug!("Target folder set to {:?}", snapshot.target_folder);
        save_settings(self.store.as_ref(), &snapshot).await
    }

    pub async fn set_ttl_minutes(&self, value: &str) -> Result<bool> {
        let Some(ttl) = parse_bounded(value, &TTL_RANGE) else {
            debug!("Rejected TTL input {:?}", value);
            return Ok(false);
        };
        let snapshot = {
            let mut settings = self.settings.write().await;
            settings.ttl_minutes = ttl;
            settings.clone()
        };
        save_settings(self.store.as_ref(), &snapshot).await?;
        Ok(true)
    }

    /// 有效的修改会立即重新装载定时器
    pub async fn set_check_interval(&self, value: &str) -> Result<bool> {
        let Some(interval) = parse_bounded(value, &CHECK_INTERVAL_RANGE) else {
            debug!("Rejected check interval input {:?}", value);
            return Ok(false);
        };
        let snapshot = {
            let mut settings = self.settings.write().await;
            settings.check_interval = interval;
            settings.clone()
        };
        let saved = save_settings(self.store.as_ref(), &snapshot).await;
        self.scheduler.start_interval().await;
        saved?;
        Ok(true)
    }

    /// 恢复默认设置并重新装载定时器
    pub async fn reset_to_defaults(&self) -> Result<()> {
        let defaults = Settings::default();
        *self.settings.write().await = defaults.clone();
        let saved = save_settings(self.store.as_ref(), &defaults).await;
        info!("Settings reset to defaults");
        self.notifier.notify("Settings have been reset to defaults.");
        self.scheduler.start_interval().await;
        saved
    }
}
