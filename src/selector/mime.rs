// 扩展名 -> MIME 类型映射表
//
// 进程级常量表，只读，不做任何猜测

/// 常见扩展名对应的 MIME 类型（扩展名均为小写）
pub const COMMON_MIME_TYPES: &[(&str, &str)] = &[
    ("avi", "video/avi"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("mp4", "video/mp4"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("zip", "application/zip"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
];

/// 按扩展名查找 MIME 类型（大小写不敏感）
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    COMMON_MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// 按文件名查找 MIME 类型
///
/// 取最后一个 `.` 之后的部分作为扩展名；没有 `.` 时返回 None
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    mime_for_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_extensions() {
        assert_eq!(mime_for_extension("png"), Some("image/png"));
        assert_eq!(mime_for_extension("PNG"), Some("image/png"));
        assert_eq!(mime_for_extension("Jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("xyz"), None);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(mime_for_name("movie.final.MOV"), Some("video/quicktime"));
        assert_eq!(mime_for_name("README"), None);
        assert_eq!(mime_for_name("archive."), None);
        assert_eq!(mime_for_name(".DS_Store"), None);
    }

    #[test]
    fn test_table_is_lowercase() {
        for (ext, mime) in COMMON_MIME_TYPES {
            assert_eq!(*ext, ext.to_ascii_lowercase());
            assert!(!mime.is_empty());
        }
    }
}
