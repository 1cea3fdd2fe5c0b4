//! HTTP request handlers.

pub(crate) mod home;
pub(crate) mod navigation;
pub(crate) mod pages;

use std::time::{Duration, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Whether the request's `If-None-Match` header matches `etag`.
pub(crate) fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .map(str::trim)
                .any(|tag| tag == "*" || tag == etag || tag.strip_prefix("W/") == Some(etag))
        })
}

/// `Cache-Control` value for a staleness window.
pub(crate) fn cache_control(revalidate: Duration) -> String {
    if revalidate.is_zero() {
        "no-cache".to_owned()
    } else {
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate",
            revalidate.as_secs()
        )
    }
}

/// `Last-Modified` value for a source mtime, if known.
pub(crate) fn last_modified(mtime: f64) -> Option<String> {
    if mtime <= 0.0 {
        return None;
    }
    let since_epoch = Duration::try_from_secs_f64(mtime).ok()?;
    let modified: DateTime<Utc> = UNIX_EPOCH.checked_add(since_epoch)?.into();
    Some(modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

/// Validators and caching headers for a successful response.
pub(crate) struct Freshness {
    pub(crate) etag: String,
    pub(crate) cache_control: String,
    pub(crate) last_modified: Option<String>,
}

impl Freshness {
    /// `304 Not Modified` if the client already holds this version.
    pub(crate) fn not_modified(&self, headers: &HeaderMap) -> Option<Response> {
        etag_matches(headers, &self.etag).then(|| {
            let mut response = StatusCode::NOT_MODIFIED.into_response();
            self.apply(response.headers_mut());
            response
        })
    }

    /// Add the headers to `headers`.
    pub(crate) fn apply(&self, headers: &mut HeaderMap) {
        let mut insert = |name: header::HeaderName, value: &str| {
            if let Ok(value) = HeaderValue::from_str(value) {
                headers.insert(name, value);
            }
        };
        insert(header::ETAG, &self.etag);
        insert(header::CACHE_CONTROL, &self.cache_control);
        if let Some(last_modified) = &self.last_modified {
            insert(header::LAST_MODIFIED, last_modified);
        }
    }
}
