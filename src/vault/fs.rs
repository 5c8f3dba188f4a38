use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::error::{CleanerError, Result};
use crate::utils::{join_path, ROOT_PATH};
use super::{Vault, VaultEntry, VaultFile, VaultFolder};

/// 以本地目录作为 Vault
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        debug!("Opening filesystem vault at {:?}", root.as_ref());
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vault 路径映射到磁盘路径。包含 `.` 或 `..` 的路径不允许解析
    fn resolve(&self, vault_path: &str) -> Option<PathBuf> {
        if vault_path == ROOT_PATH {
            return Some(self.root.clone());
        }
        let mut path = self.root.clone();
        for segment in vault_path.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }

    fn entry_from_metadata(vault_path: String, metadata: &Metadata) -> Option<VaultEntry> {
        if metadata.is_dir() {
            Some(VaultEntry::Folder(VaultFolder { path: vault_path }))
        } else if metadata.is_file() {
            Some(VaultEntry::File(VaultFile::new(vault_path, creation_time(metadata))))
        } else {
            None
        }
    }
}

/// 优先取创建时间，平台不支持时退回修改时间
fn creation_time(metadata: &Metadata) -> DateTime<Utc> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

#[async_trait]
impl Vault for FsVault {
    async fn get_abstract_file(&self, path: &str) -> Option<VaultEntry> {
        let fs_path = self.resolve(path)?;
        let metadata = tokio::fs::metadata(&fs_path).await.ok()?;
        Self::entry_from_metadata(path.to_string(), &metadata)
    }

    async fn list_children(&self, folder: &VaultFolder) -> Result<Vec<VaultEntry>> {
        let fs_path = self
            .resolve(&folder.path)
            .ok_or_else(|| CleanerError::InvalidPath(folder.path.clone()))?;

        let mut children = Vec::new();
        let mut dir = tokio::fs::read_dir(&fs_path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping non UTF-8 entry {:?} in {}", raw, folder.path);
                    continue;
                }
            };
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Failed to stat {}/{}: {}", folder.path, name, e);
                    continue;
                }
            };
            if let Some(child) = Self::entry_from_metadata(join_path(&folder.path, &name), &metadata) {
                children.push(child);
            }
        }
        Ok(children)
    }

    async fn delete(&self, file: &VaultFile) -> Result<()> {
        let fs_path = self
            .resolve(&file.path)
            .ok_or_else(|| CleanerError::InvalidPath(file.path.clone()))?;
        tokio::fs::remove_file(&fs_path).await?;
        debug!("Removed {:?}", fs_path);
        Ok(())
    }
}
