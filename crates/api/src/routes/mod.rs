pub mod cast_action;
pub mod earnings;
pub mod health;
pub mod page;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(earnings::router())
        .merge(cast_action::router())
        .merge(page::router())
        .with_state(state)
}
