//! Moxie earnings proxy route.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use moxie_common::error::AppError;
use moxie_common::types::EarningsSnapshot;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/moxie-earnings", get(moxie_earnings))
}

#[derive(Debug, Deserialize)]
pub struct EarningsQuery {
    #[serde(rename = "entityId")]
    entity_id: Option<String>,
}

/// GET /api/moxie-earnings?entityId=... — fetch the caller's earnings
/// snapshot across all three timeframes.
///
/// A missing or empty `entityId` is rejected before any remote call is made.
async fn moxie_earnings(
    State(state): State<AppState>,
    Query(query): Query<EarningsQuery>,
) -> Result<Json<EarningsSnapshot>, AppError> {
    tracing::info!(entity_id = ?query.entity_id, "Moxie earnings route called");

    let entity_id = query.entity_id.as_deref().unwrap_or_default();
    if entity_id.is_empty() {
        tracing::warn!("entityId parameter is missing");
        return Err(AppError::Validation(
            "entityId parameter is required".to_string(),
        ));
    }

    let snapshot = state.aggregator.snapshot(entity_id).await?;

    tracing::debug!(
        entity_id,
        today = snapshot.today.all_earnings_amount,
        weekly = snapshot.weekly.all_earnings_amount,
        lifetime = snapshot.lifetime.all_earnings_amount,
        "Returning earnings snapshot"
    );

    Ok(Json(snapshot))
}
