//! Earnings aggregator — fans out one query per timeframe and assembles the
//! full snapshot.
//!
//! For each timeframe (TODAY, WEEKLY, LIFETIME):
//! 1. Query the source for the entity's earning stats
//! 2. An upstream query error fails the whole snapshot (uniform policy
//!    across all three timeframes)
//! 3. An empty result is absorbed into a zero-filled default record
//!
//! The three fetches have no ordering dependency and are issued concurrently;
//! assembly is keyed by timeframe, not completion order.

use std::sync::Arc;

use moxie_common::error::AppError;
use moxie_common::types::{EarningsRecord, EarningsSnapshot, Timeframe};

use crate::airstack::EarningsSource;

/// Aggregates per-timeframe Moxie earnings into one snapshot.
#[derive(Clone)]
pub struct EarningsAggregator {
    source: Arc<dyn EarningsSource>,
}

impl EarningsAggregator {
    pub fn new(source: Arc<dyn EarningsSource>) -> Self {
        Self { source }
    }

    /// Fetch a full earnings snapshot for `entity_id`.
    ///
    /// Callers validate the id first — an empty string is a request-level
    /// validation error, not this component's concern.
    pub async fn snapshot(&self, entity_id: &str) -> Result<EarningsSnapshot, AppError> {
        let (today, weekly, lifetime) = tokio::try_join!(
            self.fetch_timeframe(entity_id, Timeframe::Today),
            self.fetch_timeframe(entity_id, Timeframe::Weekly),
            self.fetch_timeframe(entity_id, Timeframe::Lifetime),
        )?;

        Ok(EarningsSnapshot {
            today,
            weekly,
            lifetime,
        })
    }

    /// Fetch and normalize one timeframe's record.
    async fn fetch_timeframe(
        &self,
        entity_id: &str,
        timeframe: Timeframe,
    ) -> Result<EarningsRecord, AppError> {
        tracing::debug!(entity_id, %timeframe, "Fetching Moxie earnings from Airstack");

        let stats = self
            .source
            .earning_stats(entity_id, timeframe)
            .await
            .inspect_err(|e| {
                tracing::error!(entity_id, %timeframe, error = %e, "Airstack query failed");
            })?;

        let record = match stats.into_iter().next() {
            Some(raw) => EarningsRecord::from_raw(raw, entity_id),
            None => {
                tracing::debug!(
                    entity_id,
                    %timeframe,
                    "No upstream record, substituting zero-filled default"
                );
                EarningsRecord::zeroed(entity_id)
            }
        };

        Ok(record)
    }
}
