//! Embedded static assets.

use std::sync::Arc;

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Stylesheet shared by every page.
const STYLE_CSS: &str = include_str!("../assets/style.css");

/// Create router for embedded static files.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().route("/static/style.css", get(serve_style))
}

async fn serve_style() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLE_CSS,
    )
}
