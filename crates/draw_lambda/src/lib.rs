//! AWS-oriented adapters and handlers for running ticket draws.
//!
//! This crate owns runtime integration details (the Lambda handler, S3
//! storage adapter, environment configuration and subscriber setup) and
//! delegates selection and contracts to `draw_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
