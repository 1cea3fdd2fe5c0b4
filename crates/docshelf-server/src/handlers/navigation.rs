//! Navigation API endpoint.
//!
//! Returns the list of documents shown in the sidebar.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use docshelf_site::{NavItem, NavigationList};
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    items: Vec<NavItemResponse>,
}

/// One document in the navigation response.
#[derive(Serialize)]
struct NavItemResponse {
    /// Document identifier.
    id: String,
    /// Source file name.
    path: String,
    /// `markdown` or `html`.
    format: &'static str,
}

impl From<&NavItem> for NavItemResponse {
    fn from(item: &NavItem) -> Self {
        Self {
            id: item.id.clone(),
            path: item.path.clone(),
            format: item.format.as_str(),
        }
    }
}

impl From<&NavigationList> for NavigationResponse {
    fn from(list: &NavigationList) -> Self {
        Self {
            items: list.iter().map(NavItemResponse::from).collect(),
        }
    }
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let navigation = state.site.navigation();
    Json(NavigationResponse::from(navigation.as_ref()))
}
