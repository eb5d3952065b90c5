// 结果聚合：展平嵌套结果并过滤系统元数据文件

use tracing::debug;

use super::types::{DecoratedFile, Resolved};

/// drop 结果中需要忽略的系统元数据文件
pub const FILES_TO_IGNORE: &[&str] = &[
    ".DS_Store", // macOS
    "Thumbs.db", // Windows
];

/// 文件名是否在忽略列表中（精确匹配）
pub fn is_ignored(name: &str) -> bool {
    FILES_TO_IGNORE.contains(&name)
}

/// 展平任意嵌套的结果，每个叶子恰好出现一次
pub fn flatten(resolved: Vec<Resolved>) -> Vec<DecoratedFile> {
    let mut files = Vec::new();
    flatten_into(resolved, &mut files);
    files
}

fn flatten_into(resolved: Vec<Resolved>, files: &mut Vec<DecoratedFile>) {
    for node in resolved {
        match node {
            Resolved::File(file) => files.push(file),
            Resolved::Tree(children) => flatten_into(children, files),
        }
    }
}

/// drop 阶段的聚合：展平后去掉忽略列表中的文件
pub fn aggregate_drop(resolved: Vec<Resolved>) -> Vec<DecoratedFile> {
    flatten(resolved)
        .into_iter()
        .filter(|file| {
            if is_ignored(file.name()) {
                debug!("忽略系统文件: {}", file.path());
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::decorator::FileDecorator;
    use crate::selector::types::RawFile;

    fn leaf(name: &str, path: &str) -> Resolved {
        Resolved::File(FileDecorator::decorate(RawFile::empty(name), Some(path)))
    }

    #[test]
    fn test_flatten_nested() {
        let tree = vec![
            leaf("a.txt", "a.txt"),
            Resolved::Tree(vec![
                leaf("b.txt", "/d/b.txt"),
                Resolved::Tree(vec![Resolved::Tree(vec![leaf("c.txt", "/d/e/c.txt")])]),
            ]),
            Resolved::Tree(Vec::new()),
        ];

        let files = flatten(tree);
        let paths: Vec<_> = files.iter().map(|f| f.path()).collect();
        assert_eq!(paths, vec!["a.txt", "/d/b.txt", "/d/e/c.txt"]);
    }

    #[test]
    fn test_aggregate_drop_removes_ignored() {
        let tree = vec![Resolved::Tree(vec![
            leaf(".DS_Store", "/d/.DS_Store"),
            leaf("Thumbs.db", "/d/Thumbs.db"),
            leaf("photo.jpg", "/d/photo.jpg"),
            // 只做精确匹配
            leaf("thumbs.db", "/d/thumbs.db"),
        ])];

        let files = aggregate_drop(tree);
        let names: Vec<_> = files.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["photo.jpg", "thumbs.db"]);
    }

    #[test]
    fn test_flatten_keeps_ignored_names() {
        let files = flatten(vec![leaf(".DS_Store", ".DS_Store")]);
        assert_eq!(files.len(), 1);
    }
}
