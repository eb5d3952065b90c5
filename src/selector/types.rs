// 事件解析模块数据类型定义

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::error::Result;

/// 平台提供的原始文件句柄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFile {
    /// 文件名
    name: String,
    /// 文件内容
    content: Vec<u8>,
    /// 平台声明的 MIME 类型（可能为空）
    declared_type: String,
    /// 文件选择框（目录模式）给出的相对路径
    relative_path: Option<String>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            declared_type: String::new(),
            relative_path: None,
        }
    }

    /// 空内容文件
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }

    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// 字节长度
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }
}

/// 附加了路径与 MIME 类型的文件
///
/// `path` 与 `mime_type` 在构造时确定，之后只读
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedFile {
    file: RawFile,
    path: String,
    mime_type: String,
}

impl DecoratedFile {
    /// 只允许装饰器构造
    pub(super) fn from_parts(file: RawFile, path: String, mime_type: String) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            file,
            path,
            mime_type,
        }
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        self.file.content()
    }

    pub fn size(&self) -> u64 {
        self.file.size()
    }

    /// 原始文件句柄（内容不变）
    pub fn raw(&self) -> &RawFile {
        &self.file
    }

    pub fn into_content(self) -> Vec<u8> {
        self.file.content
    }
}

impl Serialize for DecoratedFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DecoratedFile", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("type", self.mime_type())?;
        state.serialize_field("size", &self.size())?;
        state.end()
    }
}

/// 拖放条目的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Other,
}

impl ItemKind {
    /// 按 DOM 的 kind 字符串解析，只有 "file" 是文件
    pub fn from_kind(kind: &str) -> Self {
        if kind == "file" {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// 拖拽事件阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    DragStart,
    Drag,
    DragEnter,
    DragOver,
    DragLeave,
    DragEnd,
    Drop,
}

impl DragPhase {
    /// 只有 drop 阶段可以读取条目内容
    pub fn is_drop(&self) -> bool {
        matches!(self, Self::Drop)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::Drag => "drag",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::DragEnd => "dragend",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DragPhase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dragstart" => Ok(Self::DragStart),
            "drag" => Ok(Self::Drag),
            "dragenter" => Ok(Self::DragEnter),
            "dragover" => Ok(Self::DragOver),
            "dragleave" => Ok(Self::DragLeave),
            "dragend" => Ok(Self::DragEnd),
            "drop" => Ok(Self::Drop),
            other => Err(format!("未知的拖拽事件类型: {}", other)),
        }
    }
}

/// 文件条目（只在 drop 阶段可用）
#[async_trait]
pub trait FileEntry: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// 在本次拖放中的完整路径，以 `/` 开头
    fn full_path(&self) -> &str;

    /// 取得带内容的文件句柄
    async fn file(&self) -> Result<RawFile>;
}

/// 目录条目
pub trait DirectoryEntry: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn full_path(&self) -> &str;

    /// 创建该目录的读取器，每次调用返回一个新的游标
    fn create_reader(&self) -> Box<dyn DirectoryReader>;
}

/// 目录读取器
///
/// 单消费者游标：`&mut self` 保证同一时刻最多一个未完成的读取请求
#[async_trait]
pub trait DirectoryReader: Send {
    /// 读取下一批子条目，返回空批次表示目录已读完
    async fn read_entries(&mut self) -> Result<Vec<Entry>>;
}

/// 文件系统条目
#[derive(Debug, Clone)]
pub enum Entry {
    File(Arc<dyn FileEntry>),
    Directory(Arc<dyn DirectoryEntry>),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => file.name(),
            Self::Directory(dir) => dir.name(),
        }
    }

    pub fn full_path(&self) -> &str {
        match self {
            Self::File(file) => file.full_path(),
            Self::Directory(dir) => dir.full_path(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// 拖放数据中的单个条目
///
/// `entry` 为 None 表示平台不提供条目接口（旧式条目），只能通过 `file` 取文件
#[derive(Debug, Clone)]
pub struct DataTransferItem {
    pub(crate) kind: ItemKind,
    pub(crate) entry: Option<Entry>,
    pub(crate) file: Option<RawFile>,
}

impl DataTransferItem {
    /// 旧式文件条目（没有条目接口）
    pub fn legacy(file: Option<RawFile>) -> Self {
        Self {
            kind: ItemKind::File,
            entry: None,
            file,
        }
    }

    /// 带条目接口的文件条目
    pub fn with_entry(entry: Entry, file: Option<RawFile>) -> Self {
        Self {
            kind: ItemKind::File,
            entry: Some(entry),
            file,
        }
    }

    /// 非文件条目（例如拖拽的文本）
    pub fn other() -> Self {
        Self {
            kind: ItemKind::Other,
            entry: None,
            file: None,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub fn file(&self) -> Option<&RawFile> {
        self.file.as_ref()
    }
}

impl fmt::Display for DataTransferItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataTransferItem(kind={:?}", self.kind)?;
        if let Some(entry) = &self.entry {
            write!(f, ", entry={}", entry.full_path())?;
        }
        write!(f, ")")
    }
}

/// 拖拽事件携带的数据
#[derive(Debug, Clone, Default)]
pub struct DragPayload {
    pub items: Vec<DataTransferItem>,
}

impl DragPayload {
    pub fn new(items: Vec<DataTransferItem>) -> Self {
        Self { items }
    }
}

/// 选择事件
///
/// 在边界处一次性区分来源：拖拽（有拖放数据）或文件选择框
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    Drag {
        phase: DragPhase,
        payload: DragPayload,
    },
    Input {
        /// 选中的文件，None 表示没有文件列表
        files: Option<Vec<RawFile>>,
    },
}

impl SelectionEvent {
    pub fn drop(items: Vec<DataTransferItem>) -> Self {
        Self::Drag {
            phase: DragPhase::Drop,
            payload: DragPayload::new(items),
        }
    }

    pub fn drag(phase: DragPhase, items: Vec<DataTransferItem>) -> Self {
        Self::Drag {
            phase,
            payload: DragPayload::new(items),
        }
    }

    pub fn input(files: Vec<RawFile>) -> Self {
        Self::Input { files: Some(files) }
    }
}

/// 解析的中间结果（可任意嵌套）
#[derive(Debug, Clone)]
pub enum Resolved {
    File(DecoratedFile),
    Tree(Vec<Resolved>),
}

impl Resolved {
    /// 叶子文件数
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::File(_) => 1,
            Self::Tree(children) => children.iter().map(Resolved::leaf_count).sum(),
        }
    }
}

/// 事件解析结果
#[derive(Debug, Clone)]
pub enum Selection {
    /// 解析完成的文件
    Files(Vec<DecoratedFile>),
    /// 非 drop 阶段：未解析的文件条目
    Items(Vec<DataTransferItem>),
}

impl Selection {
    pub fn len(&self) -> usize {
        match self {
            Self::Files(files) => files.len(),
            Self::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn files(&self) -> Option<&[DecoratedFile]> {
        match self {
            Self::Files(files) => Some(files),
            Self::Items(_) => None,
        }
    }

    pub fn into_files(self) -> Option<Vec<DecoratedFile>> {
        match self {
            Self::Files(files) => Some(files),
            Self::Items(_) => None,
        }
    }
}
