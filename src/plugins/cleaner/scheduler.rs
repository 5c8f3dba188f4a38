use chrono::Utc;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};
use crate::notice::Notifier;
use crate::vault::Vault;
use super::pass::{run_cleanup, CleanupReport};
use super::settings::Settings;

/// 定时清理。任何时刻最多只有一个定时器
///
/// 定时器任务只负责计时，每次清理都在独立的任务中执行，
/// 所以清除定时器不会打断进行中的清理。
pub struct CleanupScheduler {
    settings: Arc<RwLock<Settings>>,
    vault: Arc<dyn Vault>,
    notifier: Arc<dyn Notifier>,
    timer: Mutex<Option<JoinHandle<()>>>,
    // 同一时刻只允许一次清理
    pass_lock: Mutex<()>,
}

impl CleanupScheduler {
    pub fn new(
        settings: Arc<RwLock<Settings>>,
        vault: Arc<dyn Vault>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            vault,
            notifier,
            timer: Mutex::new(None),
            pass_lock: Mutex::new(()),
        }
    }

    /// 重新装载定时器：先清除旧的，间隔为 0 时只通知已停止；
    /// 否则立即清理一次（等待进行中的清理结束），之后每隔 `checkInterval` 分钟清理一次
    pub async fn start_interval(self: &Arc<Self>) {
        self.clear_timer().await;

        let settings = self.settings.read().await.clone();
        let check_interval = settings.check_interval;
        let period = match settings.interval() {
            Some(period) => period,
            None => {
                info!("Auto Temp Cleaner disarmed");
                self.notifier.notify("Auto Temp Cleaner has been stopped.");
                return;
            }
        };

        info!("Arming cleanup timer every {} minutes", check_interval);
        self.notifier
            .notify(&format!("Run Auto Temp Cleaner every {} minutes.", check_interval));

        self.wait_and_run_pass().await;

        let scheduler: Weak<Self> = Arc::downgrade(self);
        let ticker_task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(scheduler) = scheduler.upgrade() else {
                    debug!("Scheduler dropped, stopping cleanup timer");
                    break;
                };
                debug!("Running scheduled cleanup");
                tokio::spawn(async move {
                    scheduler.run_pass().await;
                });
            }
        });

        // 并发的重新装载可能已经放入了定时器，先清除再替换
        let mut timer = self.timer.lock().await;
        if let Some(previous) = timer.replace(ticker_task) {
            previous.abort();
        }
    }

    /// 清除定时器。进行中的清理不会被打断
    pub async fn stop(&self) {
        if self.clear_timer().await {
            info!("Stopping cleanup timer");
        }
    }

    async fn clear_timer(&self) -> bool {
        match self.timer.lock().await.take() {
            Some(handle) => {
                debug!("Clearing cleanup timer");
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub async fn is_armed(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// 执行一次清理。上一次尚未结束时跳过并返回 `None`
    pub async fn run_pass(&self) -> Option<CleanupReport> {
        let Ok(_running) = self.pass_lock.try_lock() else {
            debug!("Cleanup pass already in progress, skipping");
            return None;
        };
        Some(self.cleanup_now().await)
    }

    /// 等进行中的清理结束后再执行一次
    pub async fn wait_and_run_pass(&self) -> CleanupReport {
        let _running = self.pass_lock.lock().await;
        self.cleanup_now().await
    }

    async fn cleanup_now(&self) -> CleanupReport {
        let settings = self.settings.read().await.clone();
        run_cleanup(&settings, self.vault.as_ref(), self.notifier.as_ref(), Utc::now()).await
    }
}

impl Drop for CleanupScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}
