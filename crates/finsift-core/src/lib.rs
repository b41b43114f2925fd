//! Core contracts for finsift.
//!
//! This crate contains:
//! - Canonical domain models and validation (bars, series, securities)
//! - Response envelope for machine-readable outputs
//! - Shared structured errors

pub mod domain;
pub mod envelope;
pub mod error;

pub use domain::{Bar, PriceSeries, Security, SecurityId, Ticker, UtcDateTime};
pub use envelope::{Envelope, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
