//! Document pages, HTML and JSON.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use docshelf_renderer::TocEntry;
use docshelf_site::PageRenderResult;
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::{Freshness, cache_control, compute_etag, last_modified};
use crate::state::AppState;
use crate::template::{self, LayoutData};

/// Response for GET /api/pages/{id}.
#[derive(Serialize)]
struct PageResponse<'a> {
    meta: PageMeta<'a>,
    toc: &'a [TocEntry],
    /// Rendered HTML content.
    content: &'a str,
}

/// Page metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta<'a> {
    id: &'a str,
    /// Front matter title, or the identifier.
    title: &'a str,
    source_file: &'a str,
    /// `markdown` or `html`.
    format: &'static str,
    /// Last modification time (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    /// Front matter keys other than `title` and `description`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    front_matter: &'a BTreeMap<String, serde_json::Value>,
}

impl<'a> From<&'a PageRenderResult> for PageResponse<'a> {
    fn from(result: &'a PageRenderResult) -> Self {
        let page = &result.page;
        Self {
            meta: PageMeta {
                id: &page.id,
                title: &page.title,
                source_file: &page.source_path,
                format: page.format.as_str(),
                last_modified: iso_timestamp(page.source_mtime),
                description: page.description.as_deref(),
                front_matter: &page.metadata.extra,
            },
            toc: &result.toc,
            content: &result.html,
        }
    }
}

/// Handle GET /docs/{id}.
pub(crate) async fn get_page(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let result = match state.site.render(&id) {
        Ok(result) => result,
        Err(e) if e.is_not_found() => return not_found_page(&state, &format!("/docs/{id}")),
        Err(e) => {
            tracing::error!(id = %id, error = %e, "Failed to render page");
            return error_page(&state);
        }
    };

    let page = &result.page;
    let html = template::render_layout(&LayoutData {
        site_title: &state.site_title,
        page_title: template::document_title(&page.title, &state.site_title),
        description: page
            .description
            .clone()
            .unwrap_or_else(|| template::document_description(&page.title)),
        navigation: &page.navigation,
        active: Some(&page.id),
        content: &result.html,
    });

    let freshness = Freshness {
        etag: compute_etag(&state.version, &html),
        cache_control: cache_control(state.site.revalidate()),
        last_modified: last_modified(page.source_mtime),
    };
    if let Some(response) = freshness.not_modified(&headers) {
        return response;
    }

    let mut response = Html(html).into_response();
    freshness.apply(response.headers_mut());
    response
}

/// Handle GET /api/pages/{id}.
pub(crate) async fn get_page_api(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let result = state.site.render(&id)?;

    let freshness = Freshness {
        etag: compute_etag(&state.version, &result.html),
        cache_control: cache_control(state.site.revalidate()),
        last_modified: last_modified(result.page.source_mtime),
    };
    if let Some(response) = freshness.not_modified(&headers) {
        return Ok(response);
    }

    let mut response = Json(PageResponse::from(result.as_ref())).into_response();
    freshness.apply(response.headers_mut());
    Ok(response)
}

/// Fallback for unknown routes.
pub(crate) async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    not_found_page(&state, uri.path())
}

/// 404 page inside the normal layout.
fn not_found_page(state: &AppState, path: &str) -> Response {
    let navigation = state.site.navigation();
    let content = template::render_not_found_content(path);
    let html = template::render_layout(&LayoutData {
        site_title: &state.site_title,
        page_title: template::document_title("Page not found", &state.site_title),
        description: template::document_description("Page not found"),
        navigation: &navigation,
        active: None,
        content: &content,
    });
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

/// Generic 500 page inside the normal layout.
fn error_page(state: &AppState) -> Response {
    let navigation = state.site.navigation();
    let content = template::render_error_content();
    let html = template::render_layout(&LayoutData {
        site_title: &state.site_title,
        page_title: template::document_title("Error", &state.site_title),
        description: template::document_description("Error"),
        navigation: &navigation,
        active: None,
        content: &content,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
}

fn iso_timestamp(mtime: f64) -> Option<String> {
    if mtime <= 0.0 {
        return None;
    }
    let since_epoch = Duration::try_from_secs_f64(mtime).ok()?;
    let modified: DateTime<Utc> = UNIX_EPOCH.checked_add(since_epoch)?.into();
    Some(modified.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(
            iso_timestamp(1_700_000_000.0).as_deref(),
            Some("2023-11-14T22:13:20+00:00")
        );
        assert_eq!(iso_timestamp(0.0), None);
    }
}
