//! 文件与目录树删除。

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::path::parent_of;
use crate::types::OperationResult;

/// 删除 `path` 处的目录树、文件或符号链接。
///
/// 符号链接只删除链接本身，不影响其目标。路径不存在或为特殊文件时不做修改。
pub fn delete(path: &Path) -> Result<OperationResult> {
    let file_type = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata.file_type(),
        Err(_) => {
            debug!(path = %path.display(), "delete target does not exist");
            return Ok(OperationResult::unchanged(path));
        }
    };

    if file_type.is_dir() {
        fs::remove_dir_all(path)?;
        info!(path = %path.display(), "deleted directory");
    } else if file_type.is_file() || file_type.is_symlink() {
        fs::remove_file(path)?;
        info!(path = %path.display(), "deleted file");
    } else {
        debug!(path = %path.display(), "delete target is neither file nor directory");
        return Ok(OperationResult::unchanged(path));
    }

    Ok(OperationResult::applied(parent_of(path)))
}
