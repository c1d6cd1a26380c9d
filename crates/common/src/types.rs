use serde::{Deserialize, Serialize};

/// Entity type used in every stats query — this service only queries
/// Farcaster user accounts.
pub const ENTITY_TYPE_USER: &str = "USER";

/// Aggregation window for a Moxie earnings query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timeframe {
    Today,
    Weekly,
    Lifetime,
}

impl Timeframe {
    /// All timeframes queried for one snapshot, in response-key order.
    pub const ALL: [Timeframe; 3] = [Timeframe::Today, Timeframe::Weekly, Timeframe::Lifetime];

    /// GraphQL enum value (`FarcasterMoxieEarningStatsTimeframe`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Today => "TODAY",
            Timeframe::Weekly => "WEEKLY",
            Timeframe::Lifetime => "LIFETIME",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One earnings record as returned by the upstream analytics source.
///
/// Every field is optional — Airstack may omit any of them, and the
/// normalized [`EarningsRecord`] fills the gaps with defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEarningStat {
    pub all_earnings_amount: Option<f64>,
    pub frame_dev_earnings_amount: Option<f64>,
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub cast_earnings_amount: Option<f64>,
    pub other_earnings_amount: Option<f64>,
}

/// A fully populated earnings record for one timeframe.
///
/// Invariant: every field is always present — consumers never see a missing
/// amount or identity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsRecord {
    pub all_earnings_amount: f64,
    pub frame_dev_earnings_amount: f64,
    pub entity_id: String,
    pub entity_type: String,
    pub cast_earnings_amount: f64,
    pub other_earnings_amount: f64,
}

impl EarningsRecord {
    /// Zero-filled default for an entity with no upstream record in the
    /// requested timeframe. The requested `entityId` is echoed back.
    pub fn zeroed(entity_id: &str) -> Self {
        Self {
            all_earnings_amount: 0.0,
            frame_dev_earnings_amount: 0.0,
            entity_id: entity_id.to_string(),
            entity_type: ENTITY_TYPE_USER.to_string(),
            cast_earnings_amount: 0.0,
            other_earnings_amount: 0.0,
        }
    }

    /// Normalize an upstream record, substituting `0` for individually
    /// missing amounts and the requested identity for missing identity fields.
    pub fn from_raw(raw: RawEarningStat, requested_entity_id: &str) -> Self {
        Self {
            all_earnings_amount: raw.all_earnings_amount.unwrap_or(0.0),
            frame_dev_earnings_amount: raw.frame_dev_earnings_amount.unwrap_or(0.0),
            entity_id: raw
                .entity_id
                .unwrap_or_else(|| requested_entity_id.to_string()),
            entity_type: raw
                .entity_type
                .unwrap_or_else(|| ENTITY_TYPE_USER.to_string()),
            cast_earnings_amount: raw.cast_earnings_amount.unwrap_or(0.0),
            other_earnings_amount: raw.other_earnings_amount.unwrap_or(0.0),
        }
    }
}

/// The earnings endpoint's response payload: one record per timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsSnapshot {
    pub today: EarningsRecord,
    pub weekly: EarningsRecord,
    pub lifetime: EarningsRecord,
}
