//! Axum HTTP server for the Moxie Stats Frame service.
//!
//! Endpoints:
//! - GET  /health — liveness probe
//! - GET  /api/moxie-earnings?entityId=... — earnings snapshot proxy
//! - GET  /api/cast-action — cast-action discovery descriptor
//! - POST /api/cast-action — cast-action invocation (frame redirect)
//! - GET  / — hosting page with Frame metadata tags

pub mod routes;
pub mod state;
