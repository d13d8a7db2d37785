//! 内容操作错误类型。

use std::io;
use std::path::Path;

use thiserror::Error;

/// 内容操作错误。
///
/// 校验类不匹配（目标已存在、请求格式错误、类型不一致）不属于错误，
/// 而是返回 [`OperationStatus::Unchanged`](crate::OperationStatus::Unchanged)。
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("路径不存在: {0}")]
    PathNotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("无法解析用户名: uid {uid}")]
    OwnerLookup { uid: u32 },

    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
}

impl ContentError {
    /// 按错误类型归类读取 `path` 时产生的 IO 错误。
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        let display = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound(display),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            io::ErrorKind::NotADirectory => Self::NotADirectory(display),
            _ => Self::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
