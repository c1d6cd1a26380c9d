//! Airstack GraphQL client for Farcaster Moxie earning stats.
//!
//! One query template, parameterized by entity id and timeframe. The client
//! is constructed once at startup and shared through [`EarningsSource`] so
//! tests can substitute a fake source without touching the network.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;

use moxie_common::error::AppError;
use moxie_common::types::{RawEarningStat, Timeframe};

/// GraphQL query for Moxie earning stats, filtered to a single user entity
/// across all blockchains.
const MOXIE_EARNINGS_QUERY: &str = r#"
query MoxieEarnings($entityId: String!, $timeframe: FarcasterMoxieEarningStatsTimeframe!) {
  FarcasterMoxieEarningStats(
    input: {filter: {entityType: {_eq: USER}, entityId: {_eq: $entityId}}, timeframe: $timeframe, blockchain: ALL}
  ) {
    FarcasterMoxieEarningStat {
      allEarningsAmount
      frameDevEarningsAmount
      entityId
      entityType
      castEarningsAmount
      otherEarningsAmount
    }
  }
}
"#;

/// Source of raw earning stats for one entity and timeframe.
///
/// Implemented by [`AirstackClient`] in production and by in-memory fakes in
/// tests.
#[async_trait]
pub trait EarningsSource: Send + Sync {
    /// Fetch the raw earning stats for `entity_id` in `timeframe`.
    ///
    /// An empty vec means the upstream has no record for this
    /// entity/timeframe; a query-level upstream error is `AppError::Upstream`.
    async fn earning_stats(
        &self,
        entity_id: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<RawEarningStat>, AppError>;
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(rename = "FarcasterMoxieEarningStats")]
    earning_stats: Option<StatsEnvelope>,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(rename = "FarcasterMoxieEarningStat")]
    stats: Option<Vec<RawEarningStat>>,
}

/// HTTP client for the Airstack GraphQL API.
pub struct AirstackClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl AirstackClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the GraphQL request body for one entity/timeframe query.
    fn query_body(entity_id: &str, timeframe: Timeframe) -> serde_json::Value {
        json!({
            "query": MOXIE_EARNINGS_QUERY,
            "variables": {
                "entityId": entity_id,
                "timeframe": timeframe.as_str(),
            }
        })
    }

    /// Unwrap the GraphQL envelope into the (possibly empty) stats list.
    fn unwrap_envelope(envelope: GraphQlResponse) -> Result<Vec<RawEarningStat>, AppError> {
        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.first() {
                return Err(AppError::Upstream(first.message.clone()));
            }
        }

        Ok(envelope
            .data
            .and_then(|data| data.earning_stats)
            .and_then(|stats| stats.stats)
            .unwrap_or_default())
    }
}

#[async_trait]
impl EarningsSource for AirstackClient {
    async fn earning_stats(
        &self,
        entity_id: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<RawEarningStat>, AppError> {
        let response = self
            .http
            .post(&self.api_url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&Self::query_body(entity_id, timeframe))
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let envelope: GraphQlResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("Malformed Airstack response: {}", e)))?;

        Self::unwrap_envelope(envelope)
    }
}
