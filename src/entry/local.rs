//! 本地文件系统条目
//!
//! 负责:
//! - 将本地文件 / 文件夹包装为拖放条目
//! - 按批次读取目录（每批最多 `read_batch_size` 个条目）
//! - 按配置决定是否跟随符号链接，跟随时跳过指回祖先目录的循环链接

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use super::join_drop_path;
use crate::config::ScanConfig;
use crate::selector::{
    DataTransferItem, DirectoryEntry, DirectoryReader, Entry, FileEntry, RawFile, Result,
    SelectionEvent, SelectorError,
};

/// 本地文件条目
#[derive(Debug)]
pub struct LocalFileEntry {
    name: String,
    full_path: String,
    local_path: PathBuf,
}

#[async_trait]
impl FileEntry for LocalFileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn file(&self) -> Result<RawFile> {
        let content = fs::read(&self.local_path).await.map_err(|e| {
            SelectorError::FileMaterializationFailure {
                path: self.full_path.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(RawFile::new(self.name.clone(), content))
    }
}

/// 本地目录条目
#[derive(Debug)]
pub struct LocalDirectoryEntry {
    name: String,
    full_path: String,
    local_path: PathBuf,
    options: ScanConfig,
    /// 从根到本目录的规范路径链，仅在跟随符号链接时填充
    ancestors: Arc<Vec<PathBuf>>,
}

impl DirectoryEntry for LocalDirectoryEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(LocalDirectoryReader {
            full_path: self.full_path.clone(),
            local_path: self.local_path.clone(),
            options: self.options.clone(),
            ancestors: self.ancestors.clone(),
            state: ReaderState::Pending,
        })
    }
}

enum ReaderState {
    /// 尚未打开目录
    Pending,
    Open(fs::ReadDir),
    Exhausted,
}

struct LocalDirectoryReader {
    full_path: String,
    local_path: PathBuf,
    options: ScanConfig,
    ancestors: Arc<Vec<PathBuf>>,
    state: ReaderState,
}

#[async_trait]
impl DirectoryReader for LocalDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<Entry>> {
        if let ReaderState::Pending = self.state {
            let read_dir = fs::read_dir(&self.local_path)
                .await
                .map_err(|e| read_failure(&self.full_path, e))?;
            self.state = ReaderState::Open(read_dir);
        }

        let ReaderState::Open(read_dir) = &mut self.state else {
            return Ok(Vec::new());
        };

        // 被跳过的条目不占批次名额，避免提前返回空批次
        let batch_size = self.options.read_batch_size.max(1);
        let mut batch = Vec::new();
        while batch.len() < batch_size {
            let next = read_dir
                .next_entry()
                .await
                .map_err(|e| read_failure(&self.full_path, e))?;

            let Some(dir_entry) = next else {
                self.state = ReaderState::Exhausted;
                break;
            };

            let name = dir_entry.file_name().to_string_lossy().to_string();
            let full_path = join_drop_path(&self.full_path, &name);
            if let Some(entry) =
                to_entry(name, full_path, dir_entry.path(), &self.options, &self.ancestors)
                    .await?
            {
                batch.push(entry);
            }
        }

        Ok(batch)
    }
}

fn read_failure(path: &str, err: std::io::Error) -> SelectorError {
    SelectorError::DirectoryReadFailure {
        path: path.to_string(),
        reason: err.to_string(),
    }
}

/// 按元数据生成条目，非常规文件返回 None
async fn to_entry(
    name: String,
    full_path: String,
    local_path: PathBuf,
    options: &ScanConfig,
    ancestors: &Arc<Vec<PathBuf>>,
) -> Result<Option<Entry>> {
    let metadata = if options.follow_symlinks {
        fs::metadata(&local_path).await
    } else {
        fs::symlink_metadata(&local_path).await
    }
    .map_err(|e| read_failure(&full_path, e))?;

    if metadata.is_dir() {
        let ancestors = if options.follow_symlinks {
            let canonical = fs::canonicalize(&local_path)
                .await
                .map_err(|e| read_failure(&full_path, e))?;
            if ancestors.contains(&canonical) {
                warn!(
                    "跳过循环符号链接: {} -> {}",
                    local_path.display(),
                    canonical.display()
                );
                return Ok(None);
            }
            let mut chain = ancestors.as_ref().clone();
            chain.push(canonical);
            Arc::new(chain)
        } else {
            ancestors.clone()
        };

        Ok(Some(Entry::Directory(Arc::new(LocalDirectoryEntry {
            name,
            full_path,
            local_path,
            options: options.clone(),
            ancestors,
        }))))
    } else if metadata.is_file() {
        Ok(Some(Entry::File(Arc::new(LocalFileEntry {
            name,
            full_path,
            local_path,
        }))))
    } else {
        debug!("跳过非常规文件: {}", local_path.display());
        Ok(None)
    }
}

/// 将本地路径包装为拖放根条目，完整路径为 `/<文件名>`
pub async fn local_entry(path: &Path, options: &ScanConfig) -> Result<Entry> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let full_path = join_drop_path("", &name);

    // 根条目总是跟随符号链接，与用户直接拖入目标一致
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| SelectorError::ItemNotResolvable {
            item: format!("{}: {}", path.display(), e),
        })?;

    if metadata.is_dir() {
        let mut ancestors = Vec::new();
        if options.follow_symlinks {
            let canonical = fs::canonicalize(path).await.map_err(|e| {
                SelectorError::ItemNotResolvable {
                    item: format!("{}: {}", path.display(), e),
                }
            })?;
            ancestors.push(canonical);
        }

        Ok(Entry::Directory(Arc::new(LocalDirectoryEntry {
            name,
            full_path,
            local_path: path.to_path_buf(),
            options: options.clone(),
            ancestors: Arc::new(ancestors),
        })))
    } else if metadata.is_file() {
        Ok(Entry::File(Arc::new(LocalFileEntry {
            name,
            full_path,
            local_path: path.to_path_buf(),
        })))
    } else {
        Err(SelectorError::ItemNotResolvable {
            item: path.display().to_string(),
        })
    }
}

/// 用本地路径模拟一次 drop 事件
///
/// 文件条目同时带文件句柄，目录条目只带条目
pub async fn drop_event(paths: &[PathBuf], options: &ScanConfig) -> Result<SelectionEvent> {
    let mut items = Vec::with_capacity(paths.len());

    for path in paths {
        let entry = local_entry(path, options).await?;
        let file = match &entry {
            Entry::File(file) => Some(file.file().await?),
            Entry::Directory(_) => None,
        };
        items.push(DataTransferItem::with_entry(entry, file));
    }

    info!("已构造 drop 事件: {} 个条目", items.len());
    Ok(SelectionEvent::drop(items))
}
