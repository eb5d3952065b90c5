//! 目录递归解析模块
//!
//! 负责:
//! - 按批次顺序读取目录（同一目录的读取器同一时刻只有一个请求）
//! - 同一批次内的兄弟条目并发解析，任一失败则整体失败
//! - 请求下一批之前先推进上一批的解析
//! - 空目录生成占位文件

use async_recursion::async_recursion;
use futures::future::try_join_all;
use futures::stream::{FuturesOrdered, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::decorator::{Decorate, FileDecorator};
use super::error::{Result, SelectorError};
use super::types::{DecoratedFile, DirectoryEntry, Entry, FileEntry, Resolved};

/// 目录解析器
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    cancel_token: Option<CancellationToken>,
}

impl DirectoryWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带取消令牌的解析器，令牌触发后尚未开始的读取都会失败
    pub fn with_cancel_token(cancel_token: CancellationToken) -> Self {
        Self {
            cancel_token: Some(cancel_token),
        }
    }

    /// 递归解析一个条目
    ///
    /// 文件条目直接装饰（路径为条目完整路径），目录条目进入批次读取循环
    #[async_recursion]
    pub async fn resolve_entry(&self, entry: Entry) -> Result<Resolved> {
        match entry {
            Entry::File(file) => self.resolve_file(file.as_ref()).await.map(Resolved::File),
            Entry::Directory(dir) => self.walk_directory(dir.as_ref()).await,
        }
    }

    async fn resolve_file(&self, entry: &dyn FileEntry) -> Result<DecoratedFile> {
        self.check_cancelled(entry.full_path())?;

        let file = entry.file().await.map_err(|e| {
            warn!("获取文件失败: {}, 错误: {}", entry.full_path(), e);
            e
        })?;

        debug!("解析到文件: {} ({} bytes)", entry.full_path(), file.size());
        Ok(file.decorate(Some(entry.full_path())))
    }

    /// 目录读取循环
    ///
    /// Reading -> Reading（非空批次）/ Done（空批次）/ Failed（读取或取文件出错）
    ///
    /// 每个批次登记后先推进已登记的子条目，再请求下一批；等待读取期间子条目继续解析
    async fn walk_directory(&self, dir: &dyn DirectoryEntry) -> Result<Resolved> {
        let mut reader = dir.create_reader();
        let mut pending = FuturesOrdered::new();
        let mut children = Vec::new();
        let mut empty = true;

        loop {
            self.check_cancelled(dir.full_path())?;

            let batch = {
                let mut read = reader.read_entries();
                loop {
                    tokio::select! {
                        biased;
                        Some(group) = pending.next(), if !pending.is_empty() => {
                            children.push(Resolved::Tree(group?));
                        }
                        batch = &mut read => {
                            break batch.map_err(|e| {
                                warn!("读取目录失败: {}, 错误: {}", dir.full_path(), e);
                                e
                            })?;
                        }
                    }
                }
            };

            if batch.is_empty() {
                break;
            }

            debug!("读取目录批次: {} ({} 个条目)", dir.full_path(), batch.len());
            empty = false;

            pending.push_back(try_join_all(
                batch.into_iter().map(|entry| self.resolve_entry(entry)),
            ));
        }

        // 目录已读完，立即释放读取器
        drop(reader);

        while let Some(group) = pending.try_next().await? {
            children.push(Resolved::Tree(group));
        }

        if empty {
            debug!("空目录: {}", dir.full_path());
            children.push(Resolved::File(FileDecorator::empty_directory_placeholder(
                dir.name(),
                dir.full_path(),
            )));
        }

        Ok(Resolved::Tree(children))
    }

    fn check_cancelled(&self, path: &str) -> Result<()> {
        match &self.cancel_token {
            Some(token) if token.is_cancelled() => {
                debug!("解析已取消: {}", path);
                Err(SelectorError::Cancelled {
                    path: path.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
