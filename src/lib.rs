// File Selector Library
// 拖放 / 文件选择事件解析核心库

// 配置管理模块
pub mod config;

// 日志模块
pub mod logging;

// 条目后端（内存树、本地文件系统）
pub mod entry;

// 事件解析核心模块
pub mod selector;

// 导出常用类型
pub use config::AppConfig;
pub use selector::{
    DataTransferItem, DecoratedFile, DirectoryWalker, DragPayload, DragPhase, Entry,
    EventResolver, FileDecorator, ItemKind, RawFile, Resolved, Selection, SelectionEvent,
    SelectorError,
};
