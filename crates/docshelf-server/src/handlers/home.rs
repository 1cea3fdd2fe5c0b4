//! Home page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use crate::handlers::{Freshness, cache_control, compute_etag};
use crate::state::AppState;
use crate::template::{self, LayoutData};

/// Handle GET /.
pub(crate) async fn get_home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let navigation = state.site.navigation();
    let content = template::render_home_content(&navigation);
    let html = template::render_layout(&LayoutData {
        site_title: &state.site_title,
        page_title: state.site_title.clone(),
        description: template::document_description(&state.site_title),
        navigation: &navigation,
        active: None,
        content: &content,
    });

    let freshness = Freshness {
        etag: compute_etag(&state.version, &html),
        cache_control: cache_control(state.site.revalidate()),
        last_modified: None,
    };
    if let Some(response) = freshness.not_modified(&headers) {
        return response;
    }

    let mut response = Html(html).into_response();
    freshness.apply(response.headers_mut());
    response
}
