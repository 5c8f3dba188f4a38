use std::sync::Arc;
use auto_temp_cleaner::logger::init_logger;
use auto_temp_cleaner::prelude::*;
use auto_temp_cleaner::{Config, PluginManager};
use tracing::{debug, info, error};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化配置和日志
    let config = Config::load()?;
    init_logger(&config.log_filter);

    info!("Starting Auto Temp Cleaner host, vault at {:?}", config.vault_root);

    // 创建插件管理器
    let plugin_manager = Arc::new(PluginManager::new());

    let plugin = Arc::new(AutoTempCleanerPlugin::new(
        Arc::new(FsVault::new(&config.vault_root)),
        Arc::new(JsonFileSettingsStore::new(&config.data_file)),
        Arc::new(TracingNotifier),
    ));
    if let Err(e) = plugin_manager.register_plugin(plugin).await {
        error!("Failed to register plugin: {}", e);
        return Err(e.into());
    }

    // 启动健康检查
    start_health_check(plugin_manager.clone());

    // 等待关闭信号
    wait_for_shutdown().await;

    // 优雅关闭
    info!("Shutting down...");
    if let Err(e) = plugin_manager.cleanup().await {
        error!("Error during shutdown: {}", e);
    }
    info!("Shutdown complete");

    Ok(())
}

fn start_health_check(plugin_manager: Arc<PluginManager>) {
    tokio::spawn(async move {
        let check_interval = std::time::Duration::from_secs(300); // 5 minutes
        loop {
            tokio::time::sleep(check_interval).await;
            let health_status = plugin_manager.health_check().await;
            debug!("Plugin health status: {:?}", health_status);
        }
    });
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
