//! Traffic-control intake engine: labor rules, deposit pricing, step validation and the
//! wizard reducer, plus the HTTP router and ambient config/telemetry shared with the API
//! service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
