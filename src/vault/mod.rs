use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crate::error::Result;
use crate::utils::{file_name, split_extension};

mod fs;
mod memory;

pub use fs::FsVault;
pub use memory::MemoryVault;

/// Vault 中的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    pub path: String,
    pub name: String,
    pub extension: String,
    pub ctime: DateTime<Utc>,
}

impl VaultFile {
    pub fn new(path: impl Into<String>, ctime: DateTime<Utc>) -> Self {
        let path = path.into();
        let name = file_name(&path).to_string();
        let extension = split_extension(&name).to_string();
        Self {
            path,
            name,
            extension,
            ctime,
        }
    }

    /// 相对 `now` 的年龄
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.ctime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFolder {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    File(VaultFile),
    Folder(VaultFolder),
}

impl VaultEntry {
    pub fn path(&self) -> &str {
        match self {
            VaultEntry::File(file) => &file.path,
            VaultEntry::Folder(folder) => &folder.path,
        }
    }
}

/// 宿主提供的文档存储
#[async_trait]
pub trait Vault: Send + Sync {
    /// 解析路径，不存在时返回 `None`
    async fn get_abstract_file(&self, path: &str) -> Option<VaultEntry>;

    /// 列出目录的直接子项
    async fn list_children(&self, folder: &VaultFolder) -> Result<Vec<VaultEntry>>;

    async fn delete(&self, file: &VaultFile) -> Result<()>;
}
