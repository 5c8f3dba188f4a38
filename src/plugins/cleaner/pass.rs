use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use crate::notice::Notifier;
use crate::utils::normalize_path;
use crate::vault::{Vault, VaultEntry};
use super::settings::Settings;

pub const MARKDOWN_EXTENSION: &str = "md";

/// 一次清理的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.failed.is_empty()
    }
}

/// 扫描目标目录，删除超过 TTL 的 Markdown 文件
///
/// `now` 在整次扫描中保持不变。目录不存在、停用或列目录失败时什么都不做；
/// 单个文件删除失败会跳过该文件并继续，失败的路径单独通知。
pub async fn run_cleanup(
    settings: &Settings,
    vault: &dyn Vault,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> CleanupReport {
    let mut report = CleanupReport::default();

    if !settings.is_enabled() {
        debug!("Cleaner disabled, skipping pass");
        return report;
    }

    let folder_path = normalize_path(&settings.target_folder);
    let folder = match vault.get_abstract_file(&folder_path).await {
        Some(VaultEntry::Folder(folder)) => folder,
        _ => {
            debug!("Target folder {} not found, skipping pass", folder_path);
            return report;
        }
    };

    let children = match vault.list_children(&folder).await {
        Ok(children) => children,
        Err(e) => {
            warn!("Failed to list {}: {}", folder.path, e);
            return report;
        }
    };

    let ttl = settings.ttl();
    debug!("Scanning {} entries in {}", children.len(), folder.path);

    for child in children {
        let file = match child {
            VaultEntry::File(file) if file.extension == MARKDOWN_EXTENSION => file,
            _ => continue,
        };
        if file.age(now) <= ttl {
            continue;
        }
        match vault.delete(&file).await {
            Ok(()) => {
                debug!("Deleted expired file {}", file.path);
                report.deleted.push(file.path);
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", file.path, e);
                report.failed.push(file.path);
            }
        }
    }

    if !report.deleted.is_empty() {
        info!("Deleted {} expired files from {}", report.deleted.len(), folder.path);
        notifier.notify(&format!("Deleted files: \n{}", report.deleted.join("\n")));
    }
    if !report.failed.is_empty() {
        notifier.notify(&format!("Failed to delete files: \n{}", report.failed.join("\n")));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::RecordingNotifier;
    use crate::vault::MemoryVault;
    use chrono::Duration;

    fn enabled(ttl_minutes: u32) -> Settings {
        Settings {
            target_folder: "tmp".into(),
            ttl_minutes,
            check_interval: 60,
        }
    }

    async fn scenario_vault(now: DateTime<Utc>) -> MemoryVault {
        let vault = MemoryVault::new();
        vault.add_file("tmp/a.md", now - Duration::minutes(2000)).await;
        vault.add_file("tmp/b.md", now - Duration::minutes(100)).await;
        vault.add_file("tmp/c.txt", now - Duration::minutes(5000)).await;
        vault
    }

    #[tokio::test]
    async fn test_deletes_only_expired_markdown() {
        let now = Utc::now();
        let vault = scenario_vault(now).await;
        let notifier = RecordingNotifier::new();

        let report = run_cleanup(&enabled(1440), &vault, &notifier, now).await;

        assert_eq!(report.deleted, vec!["tmp/a.md"]);
        assert!(report.failed.is_empty());
        assert!(!vault.exists("tmp/a.md").await);
        assert!(vault.exists("tmp/b.md").await);
        assert!(vault.exists("tmp/c.txt").await);

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("tmp/a.md"));
        assert!(!messages[0].contains("tmp/b.md"));
        assert!(!messages[0].contains("tmp/c.txt"));
    }

    #[tokio::test]
    async fn test_second_pass_is_noop() {
        let now = Utc::now();
        let vault = scenario_vault(now).await;
        let notifier = RecordingNotifier::new();
        let settings = enabled(1440);

        run_cleanup(&settings, &vault, &notifier, now).await;
        notifier.clear();
        let report = run_cleanup(&settings, &vault, &notifier, now).await;

        assert!(report.is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_age_equal_to_ttl_is_kept() {
        let now = Utc::now();
        let vault = MemoryVault::new();
        vault.add_file("tmp/edge.md", now - Duration::minutes(1440)).await;
        vault.add_file("tmp/over.md", now - Duration::minutes(1440) - Duration::milliseconds(1)).await;
        let notifier = RecordingNotifier::new();

        let report = run_cleanup(&enabled(1440), &vault, &notifier, now).await;

        assert_eq!(report.deleted, vec!["tmp/over.md"]);
        assert!(vault.exists("tmp/edge.md").await);
    }

    #[tokio::test]
    async fn test_subfolders_are_not_scanned() {
        let now = Utc::now();
        let vault = MemoryVault::new();
        vault.add_file("tmp/nested/old.md", now - Duration::days(30)).await;
        vault.add_file("old.md", now - Duration::days(30)).await;
        let notifier = RecordingNotifier::new();

        let report = run_cleanup(&enabled(1), &vault, &notifier, now).await;

        assert!(report.is_empty());
        assert!(vault.exists("tmp/nested/old.md").await);
        assert!(vault.exists("old.md").await);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_does_nothing() {
        let now = Utc::now();
        let vault = scenario_vault(now).await;
        let notifier = RecordingNotifier::new();
        let settings = Settings {
            check_interval: 0,
            ..enabled(1)
        };

        let report = run_cleanup(&settings, &vault, &notifier, now).await;

        assert!(report.is_empty());
        assert_eq!(vault.file_paths().await.len(), 3);
        assert_eq!(vault.list_calls().await, 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_missing_or_file_target_is_skipped() {
        let now = Utc::now();
        let vault = MemoryVault::new();
        vault.add_file("tmp", now - Duration::days(30)).await;
        let notifier = RecordingNotifier::new();

        let report = run_cleanup(&enabled(1), &vault, &notifier, now).await;
        assert!(report.is_empty());
        assert!(vault.exists("tmp").await);

        let missing = Settings {
            target_folder: "nowhere".into(),
            ..enabled(1)
        };
        assert!(run_cleanup(&missing, &vault, &notifier, now).await.is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_target_folder_is_normalized() {
        let now = Utc::now();
        let vault = MemoryVault::new();
        vault.add_file("notes/tmp/old.md", now - Duration::days(2)).await;
        let notifier = RecordingNotifier::new();
        let settings = Settings {
            target_folder: "/notes\\tmp/".into(),
            ..enabled(60)
        };

        let report = run_cleanup(&settings, &vault, &notifier, now).await;
        assert_eq!(report.deleted, vec!["notes/tmp/old.md"]);
    }

    #[tokio::test]
    async fn test_filesystem_vault_pass() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tmp = temp_dir.path().join("tmp");
        tokio::fs::create_dir_all(tmp.join("nested")).await.unwrap();
        tokio::fs::write(tmp.join("a.md"), b"# a").await.unwrap();
        tokio::fs::write(tmp.join("c.txt"), b"c").await.unwrap();
        tokio::fs::write(tmp.join("nested").join("d.md"), b"# d").await.unwrap();
        let vault = crate::vault::FsVault::new(temp_dir.path());
        let notifier = RecordingNotifier::new();

        // 两天后再看，刚创建的文件都已过期
        let later = Utc::now() + Duration::days(2);
        let report = run_cleanup(&enabled(1440), &vault, &notifier, later).await;

        assert_eq!(report.deleted, vec!["tmp/a.md"]);
        assert!(!tmp.join("a.md").exists());
        assert!(tmp.join("c.txt").exists());
        assert!(tmp.join("nested").join("d.md").exists());
        assert_eq!(notifier.messages(), vec!["Deleted files: \ntmp/a.md".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_failure_continues_and_reports() {
        let now = Utc::now();
        let vault = MemoryVault::new();
        vault.add_file("tmp/a.md", now - Duration::days(3)).await;
        vault.add_file("tmp/b.md", now - Duration::days(3)).await;
        vault.add_file("tmp/c.md", now - Duration::days(3)).await;
        vault.fail_deletes_for("tmp/b.md").await;
        let notifier = RecordingNotifier::new();

        let report = run_cleanup(&enabled(60), &vault, &notifier, now).await;

        assert_eq!(report.deleted, vec!["tmp/a.md", "tmp/c.md"]);
        assert_eq!(report.failed, vec!["tmp/b.md"]);
        assert!(vault.exists("tmp/b.md").await);
        assert_eq!(
            notifier.messages(),
            vec![
                "Deleted files: \ntmp/a.md\ntmp/c.md".to_string(),
                "Failed to delete files: \ntmp/b.md".to_string(),
            ]
        );
    }
}
