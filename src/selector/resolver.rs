// 事件解析入口
//
// 在边界处区分事件来源：拖拽事件走条目解析，文件选择框直接装饰

use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::aggregator::aggregate_drop;
use super::decorator::{Decorate, FileDecorator};
use super::error::{Result, SelectorError};
use super::filter::filter_file_items;
use super::types::{
    DataTransferItem, DecoratedFile, DragPayload, DragPhase, Entry, RawFile, Resolved,
    Selection, SelectionEvent,
};
use super::walker::DirectoryWalker;

/// 事件解析器
#[derive(Debug, Clone, Default)]
pub struct EventResolver {
    walker: DirectoryWalker,
}

impl EventResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(cancel_token: CancellationToken) -> Self {
        Self {
            walker: DirectoryWalker::with_cancel_token(cancel_token),
        }
    }

    /// 将选择事件解析为文件列表
    ///
    /// 非 drop 的拖拽阶段平台不开放条目内容，返回过滤后的原始条目
    pub async fn resolve(&self, event: SelectionEvent) -> Result<Selection> {
        match event {
            SelectionEvent::Drag { phase, payload } => self.resolve_drag(phase, payload).await,
            SelectionEvent::Input { files } => Ok(Selection::Files(input_files(files))),
        }
    }

    async fn resolve_drag(&self, phase: DragPhase, payload: DragPayload) -> Result<Selection> {
        let items = filter_file_items(payload.items);

        if !phase.is_drop() {
            debug!("{} 阶段不解析条目，返回 {} 个条目", phase, items.len());
            return Ok(Selection::Items(items));
        }

        let resolved = try_join_all(items.into_iter().map(|item| self.resolve_item(item)))
            .await
            .map_err(|e| {
                warn!("drop 解析失败: {}", e);
                e
            })?;

        let files = aggregate_drop(resolved);
        info!("drop 解析完成: {} 个文件", files.len());

        Ok(Selection::Files(files))
    }

    /// 目录条目交给目录解析器，其余条目直接取文件
    async fn resolve_item(&self, item: DataTransferItem) -> Result<Resolved> {
        let description = item.to_string();
        let DataTransferItem { entry, file, .. } = item;

        match entry {
            Some(entry @ Entry::Directory(_)) => self.walker.resolve_entry(entry).await,
            _ => {
                let file = file.ok_or(SelectorError::ItemNotResolvable { item: description })?;
                Ok(Resolved::File(file.decorate(None)))
            }
        }
    }
}

/// 文件选择框的文件，没有文件列表时返回空
fn input_files(files: Option<Vec<RawFile>>) -> Vec<DecoratedFile> {
    files
        .unwrap_or_default()
        .into_iter()
        .map(|file| FileDecorator::decorate(file, None))
        .collect()
}

/// 使用默认解析器解析事件
pub async fn from_event(event: SelectionEvent) -> Result<Selection> {
    EventResolver::new().resolve(event).await
}
