pub mod cleaner;

pub use cleaner::AutoTempCleanerPlugin;
