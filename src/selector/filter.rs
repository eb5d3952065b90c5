// 拖放条目过滤

use super::types::{DataTransferItem, ItemKind};

/// 只保留 kind 为 file 的条目，顺序不变
pub fn filter_file_items(items: Vec<DataTransferItem>) -> Vec<DataTransferItem> {
    items
        .into_iter()
        .filter(|item| item.kind() == ItemKind::File)
        .collect()
}
