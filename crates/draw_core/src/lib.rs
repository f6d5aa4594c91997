//! Shared ticket draw domain primitives.
//!
//! This crate owns ticket decoding, winner selection, and request/response
//! contracts. It intentionally excludes AWS SDK and Lambda runtime concerns;
//! storage access reaches the selector through a fetch callback.

pub mod contract;
pub mod logging;
pub mod selection;
pub mod storage_keys;
pub mod ticket;
