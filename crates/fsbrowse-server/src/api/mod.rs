//! API 路由模块。

pub mod content;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use content::create_content_router;
pub use state::AppState;

/// 构建完整的应用路由。
pub fn build_router(state: Arc<AppState>) -> Router {
    create_content_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
