//! Stable DTOs and IDs used across the cloudguard workspace.
//!
//! This crate is intentionally boring:
//! - the normalized finding and severity model
//! - stable string IDs for checks, settings and events
//! - canonical location identifiers
//! - finding fingerprints

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod finding;
pub mod ids;
pub mod location;

pub use finding::{Finding, Severity, SeverityCodeError};
pub use fingerprint::fingerprint_for_finding;
pub use location::{Cloud, LocationId};
