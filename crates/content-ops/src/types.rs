//! 目录项描述、操作结果与请求载荷。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 被列出目录的一个直接子项。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// 名称，目录带有末尾 `/`。
    pub name: String,
    /// 文件大小（字节），目录恒为 0。
    pub size: u64,
    /// 属主用户名。
    pub owner: String,
    /// 权限位的三位八进制表示，例如 `"640"`。
    pub permissions: String,
}

/// 操作是否修改了文件系统。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationStatus {
    /// 未做任何修改。
    Unchanged,
    /// 已执行请求的修改。
    Applied,
}

/// 创建、替换、删除的结果。
///
/// `path` 总是可作为浏览目标的目录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub path: PathBuf,
    pub status: OperationStatus,
}

impl OperationResult {
    pub fn applied(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: OperationStatus::Applied,
        }
    }

    pub fn unchanged(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: OperationStatus::Unchanged,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status == OperationStatus::Applied
    }
}

/// [`create`](crate::create) 的请求载荷。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequest {
    /// 字段缺失或不是布尔值时为 `None`。
    pub make_dir: Option<bool>,
    /// 文件初始内容，创建目录时忽略。
    pub text: Option<String>,
}

impl CreateRequest {
    pub fn directory() -> Self {
        Self {
            make_dir: Some(true),
            text: None,
        }
    }

    pub fn file(text: Option<impl Into<String>>) -> Self {
        Self {
            make_dir: Some(false),
            text: text.map(Into::into),
        }
    }

    /// 解析 JSON 载荷。缺失或类型错误的字段为 `None`，未知字段忽略。
    pub fn from_json(value: &Value) -> Self {
        Self {
            make_dir: value.get("make_dir").and_then(Value::as_bool),
            text: value.get("text").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

/// [`replace`](crate::replace) 的请求载荷。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceRequest {
    /// 相对根目录的源路径，缺失或不是字符串时为 `None`。
    pub src_path: Option<String>,
}

impl ReplaceRequest {
    pub fn from_path(src_path: impl Into<String>) -> Self {
        Self {
            src_path: Some(src_path.into()),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        Self {
            src_path: value
                .get("src_path")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// 把源路径拼接到 `root_dir`；绝对路径会直接取代根目录。
    pub(crate) fn resolve(&self, root_dir: &Path) -> Option<PathBuf> {
        self.src_path.as_deref().map(|src| root_dir.join(src))
    }
}
