//! Shared configuration, error taxonomy and domain types for the
//! Moxie Stats Frame service.

pub mod config;
pub mod error;
pub mod types;
