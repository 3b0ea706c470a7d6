//! Use case orchestration for cloudguard.
//!
//! This crate provides the application layer: use cases that coordinate settings, the cache
//! snapshot and the domain runner. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.

#![forbid(unsafe_code)]

mod audit;
mod explain;
mod load;
mod report;

pub use audit::{AuditInput, AuditOutput, run_audit, run_triggered};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use load::{read_cache_file, read_config_file};
pub use report::{AuditReport, CheckReport, CheckStatus, SeverityCounts, Verdict};
