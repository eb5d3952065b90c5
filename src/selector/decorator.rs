// 文件装饰器
//
// 为原始文件附加路径和推断出的 MIME 类型，两者在构造时确定

use tracing::debug;

use super::mime::mime_for_name;
use super::types::{DecoratedFile, RawFile};

/// 可被装饰的文件
///
/// 对已装饰的文件再次装饰是空操作：原样返回，忽略新的路径
pub trait Decorate {
    fn decorate(self, explicit_path: Option<&str>) -> DecoratedFile;
}

impl Decorate for RawFile {
    fn decorate(self, explicit_path: Option<&str>) -> DecoratedFile {
        let path = resolve_path(&self, explicit_path);
        let mime_type = infer_mime_type(&self);
        DecoratedFile::from_parts(self, path, mime_type)
    }
}

impl Decorate for DecoratedFile {
    fn decorate(self, explicit_path: Option<&str>) -> DecoratedFile {
        if let Some(path) = explicit_path {
            if path != self.path() {
                debug!("文件已装饰，忽略新路径: {} (保留 {})", path, self.path());
            }
        }
        self
    }
}

/// 文件装饰器
pub struct FileDecorator;

impl FileDecorator {
    /// 装饰文件
    ///
    /// 路径优先级：显式路径 > 选择框相对路径（非空） > 文件名
    pub fn decorate<F: Decorate>(file: F, explicit_path: Option<&str>) -> DecoratedFile {
        file.decorate(explicit_path)
    }

    /// 空目录占位文件：内容为空，路径为目录路径加 `/`
    pub fn empty_directory_placeholder(name: &str, full_path: &str) -> DecoratedFile {
        let path = format!("{}/", full_path);
        RawFile::empty(name).decorate(Some(&path))
    }
}

fn resolve_path(file: &RawFile, explicit_path: Option<&str>) -> String {
    let candidate = explicit_path
        .filter(|path| !path.is_empty())
        .or_else(|| file.relative_path().filter(|path| !path.is_empty()))
        .unwrap_or_else(|| file.name());

    if candidate.is_empty() {
        "/".to_string()
    } else {
        candidate.to_string()
    }
}

// 已声明的类型不会被覆盖
fn infer_mime_type(file: &RawFile) -> String {
    if !file.declared_type().is_empty() {
        return file.declared_type().to_string();
    }
    match mime_for_name(file.name()) {
        Some(mime) => mime.to_string(),
        None => file.declared_type().to_string(),
    }
}
