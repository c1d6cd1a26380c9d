//! Shared application state for the Axum API server.

use std::sync::Arc;

use moxie_common::config::AppConfig;
use moxie_engine::earnings::EarningsAggregator;
use moxie_engine::frames::FrameMessageVerifier;

/// Application state shared across all route handlers via Axum `State`.
///
/// The Airstack client lives inside the aggregator's `EarningsSource` and is
/// constructed once at startup; tests inject fakes for both seams.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: EarningsAggregator,
    pub verifier: Arc<dyn FrameMessageVerifier>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        aggregator: EarningsAggregator,
        verifier: Arc<dyn FrameMessageVerifier>,
        config: AppConfig,
    ) -> Self {
        Self {
            aggregator,
            verifier,
            config,
        }
    }
}
