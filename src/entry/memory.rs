//! 内存目录树
//!
//! 用于嵌入方构造拖放数据，也用于模拟不可读目录、不可读文件等平台错误

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;

use super::join_drop_path;
use crate::selector::{
    DataTransferItem, DirectoryEntry, DirectoryReader, DragPhase, Entry, FileEntry, RawFile,
    Result, SelectionEvent, SelectorError,
};

/// 内存目录树节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    File {
        name: String,
        content: Vec<u8>,
        declared_type: String,
    },
    Directory {
        name: String,
        children: Vec<MemoryNode>,
    },
    /// 取文件时报错的文件
    BrokenFile { name: String },
    /// 读取时报错的目录
    UnreadableDirectory { name: String },
}

impl MemoryNode {
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::File {
            name: name.into(),
            content: content.into(),
            declared_type: String::new(),
        }
    }

    pub fn file_with_type(
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        declared_type: impl Into<String>,
    ) -> Self {
        Self::File {
            name: name.into(),
            content: content.into(),
            declared_type: declared_type.into(),
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<MemoryNode>) -> Self {
        Self::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn broken_file(name: impl Into<String>) -> Self {
        Self::BrokenFile { name: name.into() }
    }

    pub fn unreadable_dir(name: impl Into<String>) -> Self {
        Self::UnreadableDirectory { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. }
            | Self::Directory { name, .. }
            | Self::BrokenFile { name }
            | Self::UnreadableDirectory { name } => name,
        }
    }

    /// 作为拖放根条目，完整路径为 `/<name>`
    pub fn into_entry(self, batch_size: usize) -> Entry {
        self.into_entry_at("", batch_size)
    }

    fn into_entry_at(self, parent: &str, batch_size: usize) -> Entry {
        let full_path = join_drop_path(parent, self.name());
        match self {
            Self::File {
                name,
                content,
                declared_type,
            } => Entry::File(Arc::new(MemoryFileEntry {
                name: name.clone(),
                full_path,
                file: Some(RawFile::new(name, content).with_type(declared_type)),
            })),
            Self::BrokenFile { name } => Entry::File(Arc::new(MemoryFileEntry {
                name,
                full_path,
                file: None,
            })),
            Self::Directory { name, children } => Entry::Directory(Arc::new(MemoryDirectoryEntry {
                name,
                full_path,
                children,
                batch_size: batch_size.max(1),
                readable: true,
            })),
            Self::UnreadableDirectory { name } => {
                Entry::Directory(Arc::new(MemoryDirectoryEntry {
                    name,
                    full_path,
                    children: Vec::new(),
                    batch_size: batch_size.max(1),
                    readable: false,
                }))
            }
        }
    }

    /// 作为拖放条目：文件同时提供条目和文件句柄，目录只提供条目
    pub fn into_item(self, batch_size: usize) -> DataTransferItem {
        let file = match &self {
            Self::File {
                name,
                content,
                declared_type,
            } => Some(RawFile::new(name.clone(), content.clone()).with_type(declared_type.clone())),
            _ => None,
        };
        DataTransferItem::with_entry(self.into_entry(batch_size), file)
    }
}

/// 构造 drop 事件
pub fn drop_event(nodes: Vec<MemoryNode>, batch_size: usize) -> SelectionEvent {
    drag_event(DragPhase::Drop, nodes, batch_size)
}

/// 构造任意阶段的拖拽事件
pub fn drag_event(phase: DragPhase, nodes: Vec<MemoryNode>, batch_size: usize) -> SelectionEvent {
    let items = nodes
        .into_iter()
        .map(|node| node.into_item(batch_size))
        .collect();
    SelectionEvent::drag(phase, items)
}

#[derive(Debug)]
struct MemoryFileEntry {
    name: String,
    full_path: String,
    file: Option<RawFile>,
}

#[async_trait]
impl FileEntry for MemoryFileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn file(&self) -> Result<RawFile> {
        self.file
            .clone()
            .ok_or_else(|| SelectorError::FileMaterializationFailure {
                path: self.full_path.clone(),
                reason: "文件不可读".to_string(),
            })
    }
}

#[derive(Debug)]
struct MemoryDirectoryEntry {
    name: String,
    full_path: String,
    children: Vec<MemoryNode>,
    batch_size: usize,
    readable: bool,
}

impl DirectoryEntry for MemoryDirectoryEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        let pending = self
            .children
            .iter()
            .cloned()
            .map(|child| child.into_entry_at(&self.full_path, self.batch_size))
            .collect();

        Box::new(MemoryDirectoryReader {
            full_path: self.full_path.clone(),
            pending,
            batch_size: self.batch_size,
            readable: self.readable,
        })
    }
}

struct MemoryDirectoryReader {
    full_path: String,
    pending: VecDeque<Entry>,
    batch_size: usize,
    readable: bool,
}

#[async_trait]
impl DirectoryReader for MemoryDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<Entry>> {
        if !self.readable {
            return Err(SelectorError::DirectoryReadFailure {
                path: self.full_path.clone(),
                reason: "目录不可读".to_string(),
            });
        }

        let take = self.batch_size.min(self.pending.len());
        Ok(self.pending.drain(..take).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reader_batches() {
        let children = (0..5)
            .map(|i| MemoryNode::file(format!("{}.txt", i), Vec::new()))
            .collect();
        let entry = MemoryNode::dir("d", children).into_entry(2);

        let Entry::Directory(dir) = entry else {
            panic!("应该是目录条目");
        };
        let mut reader = dir.create_reader();

        let mut sizes = Vec::new();
        loop {
            let batch = reader.read_entries().await.unwrap();
            if batch.is_empty() {
                break;
            }
            sizes.push(batch.len());
        }
        assert_eq!(sizes, vec![2, 2, 1]);

        // 读完之后继续读仍然是空批次
        assert!(reader.read_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_child_paths() {
        let entry = MemoryNode::dir("a", vec![MemoryNode::dir("b", Vec::new())]).into_entry(10);
        let Entry::Directory(dir) = entry else {
            panic!("应该是目录条目");
        };

        let batch = dir.create_reader().read_entries().await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].full_path(), "/a/b");
        assert!(batch[0].is_directory());
    }

    #[tokio::test]
    async fn test_declared_type_preserved() {
        let entry = MemoryNode::file_with_type("x.bin", vec![0u8; 4], "application/octet-stream")
            .into_entry(10);
        let Entry::File(file) = entry else {
            panic!("应该是文件条目");
        };

        let raw = file.file().await.unwrap();
        assert_eq!(raw.declared_type(), "application/octet-stream");
        assert_eq!(raw.size(), 4);
    }

    #[tokio::test]
    async fn test_unreadable_directory() {
        let Entry::Directory(dir) = MemoryNode::unreadable_dir("x").into_entry(10) else {
            panic!("应该是目录条目");
        };
        let err = dir.create_reader().read_entries().await.unwrap_err();
        assert_eq!(err.path(), Some("/x"));
    }

    #[test]
    fn test_into_item() {
        let item = MemoryNode::file("a.txt", Vec::new()).into_item(10);
        assert!(item.file().is_some());
        assert_eq!(item.entry().unwrap().full_path(), "/a.txt");

        let item = MemoryNode::dir("d", Vec::new()).into_item(10);
        assert!(item.file().is_none());
        assert!(item.entry().unwrap().is_directory());
    }
}
