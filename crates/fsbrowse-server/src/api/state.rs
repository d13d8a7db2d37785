//! 统一的应用状态。

use std::path::PathBuf;

use content_ops::ContentCapabilities;

/// 所有请求共享的状态，启动时确定。
#[derive(Clone, Debug)]
pub struct AppState {
    /// 绑定服务根目录的内容操作。
    pub content: ContentCapabilities,
}

impl AppState {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            content: ContentCapabilities::new(root_dir),
        }
    }

    pub fn with_content(content: ContentCapabilities) -> Self {
        Self { content }
    }
}
