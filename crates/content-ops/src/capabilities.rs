//! 绑定根目录的内容操作入口。

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::identity::{IdentityResolver, SystemIdentities};
use crate::types::{CreateRequest, EntryDescriptor, OperationResult, ReplaceRequest};

/// 绑定固定根目录的内容操作。
///
/// 调用方传入已在 [`root_dir`](Self::root_dir) 下解析好的完整路径，路径约束由调用方负责。
#[derive(Clone)]
pub struct ContentCapabilities {
    root_dir: PathBuf,
    identities: Arc<dyn IdentityResolver>,
}

impl ContentCapabilities {
    /// 使用系统用户数据库解析属主。
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_identities(root_dir, SystemIdentities)
    }

    pub fn with_identities(
        root_dir: impl Into<PathBuf>,
        identities: impl IdentityResolver + 'static,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            identities: Arc::new(identities),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn list(&self, dir: &Path) -> Result<Vec<EntryDescriptor>> {
        crate::list(dir, &*self.identities)
    }

    pub fn create(&self, path: &Path, request: &CreateRequest) -> Result<OperationResult> {
        crate::create(path, request)
    }

    pub fn replace(&self, dst: &Path, request: &ReplaceRequest) -> Result<OperationResult> {
        crate::replace(dst, request, &self.root_dir)
    }

    pub fn delete(&self, path: &Path) -> Result<OperationResult> {
        crate::delete(path)
    }
}

impl fmt::Debug for ContentCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCapabilities")
            .field("root_dir", &self.root_dir)
            .finish_non_exhaustive()
    }
}
