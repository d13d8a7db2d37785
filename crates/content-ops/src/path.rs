//! 重定向目标解析。

use std::path::{Path, PathBuf};

/// `path` 是已存在的目录时返回其本身，否则返回其语法上的父目录（无论是否存在）。
///
/// 没有父路径段的路径（例如单个相对名称）返回空路径。
pub fn resolve_parent(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        parent_of(path)
    }
}

/// `path` 的语法父目录，不访问文件系统。
pub(crate) fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
