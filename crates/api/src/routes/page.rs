//! Hosting page route — serves the HTML shell whose head carries the Frame
//! metadata tags consulted by Farcaster clients.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use moxie_common::error::AppError;
use moxie_engine::frames::PageMetadata;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(page))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    userfid: Option<String>,
}

/// GET /?userfid=... — render the hosting page. A `userfid` personalizes the
/// internal frames URL so the rendered frame fetches that user's stats.
async fn page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let metadata = PageMetadata::build(&state.config.app_url, query.userfid.as_deref())?;
    tracing::debug!(frames_url = %metadata.frames_url, "Rendering hosting page");

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n{}\n</head>\n<body><span>Loading Moxie Stats Frame...</span></body>\n</html>",
        metadata.to_head_html()
    )))
}
