//! Posture checks over collected cloud-resource snapshots.
//!
//! Re-exports the layers most callers need: findings from `cloudguard-types`, the check
//! catalog and runner from `cloudguard-domain`, and the audit use cases from `cloudguard-app`.

#![forbid(unsafe_code)]

pub use cloudguard_app::{
    AuditInput, AuditOutput, AuditReport, CheckReport, CheckStatus, ExplainOutput,
    SeverityCounts, Verdict, format_explanation, format_not_found, read_cache_file,
    read_config_file, run_audit, run_explain, run_triggered,
};
pub use cloudguard_cache::{CacheStore, SourceRecord};
pub use cloudguard_domain::{CancelToken, Catalog, Check, CheckRun, CheckRunner, CheckSpec};
pub use cloudguard_settings::{AuditConfig, Overrides, UserSettings};
pub use cloudguard_types::{Cloud, Finding, LocationId, Severity, ids};
