// 选择事件解析模块
//
// 将拖放 / 文件选择事件解析为扁平的文件列表：
// - 区分事件来源（拖拽 / 文件选择框）
// - 过滤非文件条目
// - 递归解析拖入的目录树
// - 附加路径和 MIME 类型

pub mod aggregator;
pub mod decorator;
pub mod error;
pub mod filter;
pub mod mime;
pub mod resolver;
pub mod types;
pub mod walker;

pub use aggregator::{aggregate_drop, flatten, is_ignored, FILES_TO_IGNORE};
pub use decorator::{Decorate, FileDecorator};
pub use error::{Result, SelectorError};
pub use filter::filter_file_items;
pub use mime::{mime_for_extension, mime_for_name, COMMON_MIME_TYPES};
pub use resolver::{from_event, EventResolver};
pub use types::*;
pub use walker::DirectoryWalker;
