use tracing_subscriber::EnvFilter;

/// 通知以 `notice` 为 target 输出，需要单独放行
pub const DEFAULT_LOG_FILTER: &str = "auto_temp_cleaner=info,notice=info";

/// 初始化日志。`RUST_LOG` 优先于传入的过滤规则
pub fn init_logger(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
