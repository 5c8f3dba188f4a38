use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tokio::sync::RwLock;
use crate::error::{CleanerError, Result};
use crate::utils::{normalize_path, parent_path, ROOT_PATH};
use super::{Vault, VaultEntry, VaultFile, VaultFolder};

/// 内存中的 Vault，可注入删除失败
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    folders: BTreeSet<String>,
    files: BTreeMap<String, VaultFile>,
    failing: HashSet<String>,
    list_calls: usize,
}

impl MemoryState {
    fn add_folder_chain(&mut self, path: &str) {
        let mut current = path;
        while current != ROOT_PATH {
            self.folders.insert(current.to_string());
            current = parent_path(current);
        }
    }
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加目录（含所有上级目录）
    pub async fn add_folder(&self, path: &str) {
        let path = normalize_path(path);
        self.state.write().await.add_folder_chain(&path);
    }

    pub async fn add_file(&self, path: &str, ctime: DateTime<Utc>) {
        let path = normalize_path(path);
        let mut state = self.state.write().await;
        state.add_folder_chain(parent_path(&path));
        state.files.insert(path.clone(), VaultFile::new(path, ctime));
    }

    /// 之后对该路径的删除都会失败
    pub async fn fail_deletes_for(&self, path: &str) {
        self.state.write().await.failing.insert(normalize_path(path));
    }

    pub async fn exists(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let state = self.state.read().await;
        state.files.contains_key(&path) || state.folders.contains(&path)
    }

    pub async fn file_paths(&self) -> Vec<String> {
        self.state.read().await.files.keys().cloned().collect()
    }

    /// `list_children` 的调用次数，即实际扫描的次数
    pub async fn list_calls(&self) -> usize {
        self.state.read().await.list_calls
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn get_abstract_file(&self, path: &str) -> Option<VaultEntry> {
        let state = self.state.read().await;
        if path == ROOT_PATH || state.folders.contains(path) {
            return Some(VaultEntry::Folder(VaultFolder { path: path.to_string() }));
        }
        state.files.get(path).cloned().map(VaultEntry::File)
    }

    async fn list_children(&self, folder: &VaultFolder) -> Result<Vec<VaultEntry>> {
        let mut state = self.state.write().await;
        if folder.path != ROOT_PATH && !state.folders.contains(&folder.path) {
            return Err(CleanerError::NotFound(folder.path.clone()));
        }
        state.list_calls += 1;

        let folders = state
            .folders
            .iter()
            .filter(|path| parent_path(path) == folder.path)
            .map(|path| VaultEntry::Folder(VaultFolder { path: path.clone() }));
        let files = state
            .files
            .values()
            .filter(|file| parent_path(&file.path) == folder.path)
            .cloned()
            .map(VaultEntry::File);
        Ok(folders.chain(files).collect())
    }

    async fn delete(&self, file: &VaultFile) -> Result<()> {
        let mut state = self.state.write().await;
        if state.failing.contains(&file.path) {
            return Err(CleanerError::Vault(format!("permission denied: {}", file.path)));
        }
        state
            .files
            .remove(&file.path)
            .map(|_| ())
            .ok_or_else(|| CleanerError::NotFound(file.path.clone()))
    }
}
