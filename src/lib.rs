pub mod config;
pub mod error;
pub mod logger;
pub mod notice;
pub mod plugin;
pub mod plugin_manager;
pub mod plugins;
pub mod utils;
pub mod vault;

pub use config::Config;
pub use error::{CleanerError, Result};
pub use plugin_manager::PluginManager;

pub mod prelude {
    pub use crate::notice::{Notifier, RecordingNotifier, TracingNotifier};
    pub use crate::plugin::Plugin;
    pub use crate::plugins::cleaner::{
        AutoTempCleanerPlugin, CleanupReport, CleanupScheduler, JsonFileSettingsStore,
        MemorySettingsStore, Settings, SettingsEditor, SettingsStore,
    };
    pub use crate::vault::{FsVault, MemoryVault, Vault, VaultEntry, VaultFile, VaultFolder};
}
