//! Core logic for the Moxie Stats Frame service: the Airstack GraphQL
//! client, the per-timeframe earnings aggregator, and the Farcaster Frame
//! protocol boundary.

pub mod airstack;
pub mod earnings;
pub mod frames;
