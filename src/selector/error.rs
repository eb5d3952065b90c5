// 事件解析错误类型

use thiserror::Error;

/// 事件解析错误
///
/// 任意一个分支失败都会使整个 fan-out 失败，不做部分成功聚合，也不重试
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// 拖放条目无法取得文件句柄
    #[error("拖放条目无法解析为文件: {item}")]
    ItemNotResolvable { item: String },

    /// 目录读取器在读取过程中报错
    #[error("读取目录失败: {path}: {reason}")]
    DirectoryReadFailure { path: String, reason: String },

    /// 文件条目无法生成文件句柄
    #[error("获取文件内容失败: {path}: {reason}")]
    FileMaterializationFailure { path: String, reason: String },

    /// 解析被取消令牌中止
    #[error("解析已取消: {path}")]
    Cancelled { path: String },
}

impl SelectorError {
    /// 出错条目的路径（ItemNotResolvable 没有路径）
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::ItemNotResolvable { .. } => None,
            Self::DirectoryReadFailure { path, .. }
            | Self::FileMaterializationFailure { path, .. }
            | Self::Cancelled { path } => Some(path),
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectorError::DirectoryReadFailure {
            path: "/photos".to_string(),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "读取目录失败: /photos: permission denied");
        assert_eq!(err.path(), Some("/photos"));
    }

    #[test]
    fn test_item_error_has_no_path() {
        let err = SelectorError::ItemNotResolvable {
            item: "DataTransferItem(kind=file)".to_string(),
        };
        assert!(err.path().is_none());
        assert!(err.to_string().contains("kind=file"));
    }
}
