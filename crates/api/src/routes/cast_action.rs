//! Farcaster cast-action endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use moxie_common::error::AppError;
use moxie_engine::frames::{
    CastActionDescriptor, CastActionFrameResponse, cast_action_descriptor, cast_action_frame,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/cast-action",
        get(action_descriptor).post(action_invoke),
    )
}

/// GET /api/cast-action — static action descriptor for client discovery.
async fn action_descriptor(State(state): State<AppState>) -> Json<CastActionDescriptor> {
    Json(cast_action_descriptor(&state.config.app_url))
}

/// POST /api/cast-action — parse the signed Frame message and redirect the
/// client to the stats page for the cast's author.
async fn action_invoke(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CastActionFrameResponse>, AppError> {
    let message = state.verifier.verify_and_parse(&body)?;
    tracing::info!(cast_author_fid = ?message.cast_author_fid, "Cast action invoked");

    let target = match message.cast_author_fid {
        Some(fid) => format!("{}?userfid={}", state.config.app_url, fid),
        None => state.config.app_url.clone(),
    };

    Ok(Json(cast_action_frame(&target)))
}
