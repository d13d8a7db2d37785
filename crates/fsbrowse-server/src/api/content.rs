//! 内容 API 路由。
//!
//! `/` 下的每个路径都映射到根目录下的同名路径：
//! `GET` 列出，`POST` 创建，`PUT` 替换，`DELETE` 删除。

use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use content_ops::{
    ContentError, CreateRequest, EntryDescriptor, OperationResult, OperationStatus, ReplaceRequest,
};
use fsbrowse_api_types::ErrorResponse;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;
use tracing::{error, info, warn};

use super::state::AppState;

/// 把结果路径转回路由时需要转义的字符。
const ROUTE_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 创建内容 API 路由。
pub fn create_content_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_root)
                .post(create_root)
                .put(replace_root)
                .delete(delete_root),
        )
        .route(
            "/{*path}",
            get(list_content)
                .post(create_content)
                .put(replace_content)
                .delete(delete_content),
        )
}

async fn list_root(state: State<Arc<AppState>>) -> Result<Json<Vec<EntryDescriptor>>, ApiError> {
    list_content(state, Path(String::new())).await
}

async fn create_root(state: State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    create_content(state, Path(String::new()), body).await
}

async fn replace_root(state: State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    replace_content(state, Path(String::new()), body).await
}

async fn delete_root(State(state): State<Arc<AppState>>) -> Response {
    refuse_root_delete(&state)
}

/// 根目录本身永远不会被删除。
fn refuse_root_delete(state: &AppState) -> Response {
    let root = state.content.root_dir();
    warn!(path = %root.display(), "refused to delete the root");
    redirect(root, &OperationResult::unchanged(root))
}

/// 列出 `path` 处的目录内容。
async fn list_content(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<Vec<EntryDescriptor>>, ApiError> {
    let full_path = resolve_request_path(state.content.root_dir(), &path)?;
    info!(method = "GET", path = %full_path.display(), "content request");

    let content = state.content.clone();
    let entries = run_blocking(move || content.list(&full_path)).await?;
    Ok(Json(entries))
}

/// 在 `path` 处创建文件或目录。
async fn create_content(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let full_path = resolve_request_path(state.content.root_dir(), &path)?;
    let request = CreateRequest::from_json(&decode_payload(&body)?);
    info!(method = "POST", path = %full_path.display(), "content request");

    let content = state.content.clone();
    let result = run_blocking(move || content.create(&full_path, &request)).await?;
    Ok(redirect(state.content.root_dir(), &result))
}

/// 用请求体中 `src_path` 的内容替换 `path`。
async fn replace_content(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let full_path = resolve_request_path(state.content.root_dir(), &path)?;
    let request = ReplaceRequest::from_json(&decode_payload(&body)?);
    info!(method = "PUT", path = %full_path.display(), "content request");

    let content = state.content.clone();
    let result = run_blocking(move || content.replace(&full_path, &request)).await?;
    Ok(redirect(state.content.root_dir(), &result))
}

/// 删除 `path` 处的文件或目录。
async fn delete_content(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let full_path = resolve_request_path(state.content.root_dir(), &path)?;
    if full_path.as_path() == state.content.root_dir() {
        return Ok(refuse_root_delete(&state));
    }
    info!(method = "DELETE", path = %full_path.display(), "content request");

    let content = state.content.clone();
    let result = run_blocking(move || content.delete(&full_path)).await?;
    Ok(redirect(state.content.root_dir(), &result))
}

/// 把请求路径拼接到根目录上。
///
/// 只保留普通路径段，`.` 被丢弃；`..`、绝对路径等会离开根目录的写法直接拒绝。
/// 只由 `.` 组成的路径解析为根目录本身。
fn resolve_request_path(root: &FsPath, raw: &str) -> Result<PathBuf, ApiError> {
    let mut full_path = root.to_path_buf();
    for component in FsPath::new(raw).components() {
        match component {
            Component::Normal(segment) => full_path.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                warn!(path = %raw, "rejected path outside the root");
                return Err(ApiError::bad_request(
                    "INVALID_PATH",
                    format!("Path escapes the root: {raw}"),
                ));
            }
        }
    }
    Ok(full_path)
}

/// 解析请求体；空请求体视为不含任何字段的载荷。
fn decode_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiError::bad_request("INVALID_JSON", format!("Invalid JSON body: {err}")))
}

async fn run_blocking<T, F>(operation: F) -> Result<T, ApiError>
where
    F: FnOnce() -> content_ops::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|err| {
            error!(error = %err, "content operation task failed");
            ApiError::internal(err.to_string())
        })?
        .map_err(ApiError::from)
}

/// 有修改时返回 302，否则返回 304，两者都指向结果目录。
fn redirect(root: &FsPath, result: &OperationResult) -> Response {
    let status = match result.status {
        OperationStatus::Applied => StatusCode::FOUND,
        OperationStatus::Unchanged => StatusCode::NOT_MODIFIED,
    };
    (status, [(header::LOCATION, route_for(root, &result.path))]).into_response()
}

/// 把根目录下的文件系统路径转换为可浏览的路由。
fn route_for(root: &FsPath, path: &FsPath) -> String {
    let relative = path.strip_prefix(root).unwrap_or(FsPath::new(""));
    let relative = relative.to_string_lossy();
    format!("/{}", utf8_percent_encode(&relative, ROUTE_ESCAPES))
}

/// API 错误类型。
#[derive(Debug)]
struct ApiError {
    message: String,
    code: String,
    status: StatusCode,
}

impl ApiError {
    fn bad_request(code: &str, message: String) -> Self {
        Self {
            message,
            code: code.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    fn internal(message: String) -> Self {
        Self {
            message,
            code: "INTERNAL_ERROR".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::PathNotFound(path) => ApiError {
                message: format!("Path not found: {path}"),
                code: "PATH_NOT_FOUND".to_string(),
                status: StatusCode::NOT_FOUND,
            },
            ContentError::NotADirectory(path) => ApiError {
                message: format!("Not a directory: {path}"),
                code: "NOT_A_DIRECTORY".to_string(),
                status: StatusCode::BAD_REQUEST,
            },
            ContentError::PermissionDenied(path) => ApiError {
                message: format!("Permission denied: {path}"),
                code: "PERMISSION_DENIED".to_string(),
                status: StatusCode::FORBIDDEN,
            },
            ContentError::OwnerLookup { uid } => ApiError {
                message: format!("No user name for uid {uid}"),
                code: "OWNER_LOOKUP_FAILED".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            ContentError::Io(e) => {
                error!(error = %e, "content operation failed");
                ApiError {
                    message: format!("IO error: {e}"),
                    code: "IO_ERROR".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.code, self.message));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{decode_payload, resolve_request_path, route_for};

    #[test]
    fn request_paths_stay_under_root() {
        let root = Path::new("/srv/share");

        assert_eq!(
            resolve_request_path(root, "docs/a.txt").expect("plain path"),
            PathBuf::from("/srv/share/docs/a.txt")
        );
        assert_eq!(resolve_request_path(root, "").expect("root"), PathBuf::from("/srv/share"));
        assert!(resolve_request_path(root, "../etc/passwd").is_err());
        assert!(resolve_request_path(root, "docs/../../x").is_err());
        assert!(resolve_request_path(root, "/etc").is_err());
    }

    #[test]
    fn current_dir_segments_are_dropped() {
        let root = Path::new("/srv/share");

        assert_eq!(resolve_request_path(root, ".").expect("dot"), root.to_path_buf());
        assert_eq!(resolve_request_path(root, "./.").expect("dots"), root.to_path_buf());
        assert_eq!(
            resolve_request_path(root, "docs/.").expect("trailing dot"),
            PathBuf::from("/srv/share/docs")
        );
    }

    #[test]
    fn routes_are_relative_to_root() {
        let root = Path::new("/srv/share");

        assert_eq!(route_for(root, Path::new("/srv/share")), "/");
        assert_eq!(route_for(root, Path::new("/srv/share/docs/sub")), "/docs/sub");
        assert_eq!(route_for(root, Path::new("/srv/share/my docs")), "/my%20docs");
        assert_eq!(route_for(root, Path::new("/elsewhere")), "/");
    }

    #[test]
    fn empty_body_is_null_payload() {
        assert_eq!(decode_payload(b"").expect("empty"), serde_json::Value::Null);
        assert_eq!(decode_payload(b"  \n").expect("blank"), serde_json::Value::Null);
        assert!(decode_payload(b"{not json").is_err());
    }
}
