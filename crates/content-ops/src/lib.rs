//! Content Ops - 本地目录树的内容操作。
//!
//! 提供四个操作：[`list`] 列出目录，[`create`] 创建文件或目录，
//! [`replace`] 用另一路径的内容替换，[`delete`] 删除。
//! 修改类操作返回 [`OperationResult`]：其路径总是可浏览的目录，状态表示是否发生了修改。
//! 无效或已满足的请求不做任何修改，也不视为错误。

pub mod capabilities;
pub mod create;
pub mod delete;
pub mod error;
pub mod identity;
pub mod list;
pub mod path;
pub mod replace;
pub mod types;

pub use capabilities::ContentCapabilities;
pub use create::create;
pub use delete::delete;
pub use error::{ContentError, Result};
pub use identity::{IdentityResolver, StaticIdentities, SystemIdentities};
pub use list::{DIR_MARKER, list, permission_string};
pub use path::resolve_parent;
pub use replace::replace;
pub use types::{CreateRequest, EntryDescriptor, OperationResult, OperationStatus, ReplaceRequest};
