// 条目后端
//
// 目录读取器、文件条目的具体实现：
// - memory: 内存目录树，用于嵌入和测试
// - local: 基于 tokio::fs 的本地文件系统

pub mod local;
pub mod memory;

/// 默认每批读取的条目数
pub const DEFAULT_READ_BATCH_SIZE: usize = 100;

/// 拼接拖放内路径
pub(crate) fn join_drop_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_drop_path() {
        assert_eq!(join_drop_path("", "a"), "/a");
        assert_eq!(join_drop_path("/a", "b.txt"), "/a/b.txt");
        assert_eq!(join_drop_path("/a/", "b.txt"), "/a/b.txt");
    }
}
