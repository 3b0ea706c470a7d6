//! Check settings: declared schemas, user overrides, and `cloudguard.toml` parsing.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod config;
mod model;
mod resolve;
mod schema;

pub use config::{AuditConfig, Overrides};
pub use model::{CheckConfig, CloudguardConfigV1};
pub use resolve::{ConfigurationError, ResolvedSettings, UserSettings, is_custom, resolve_settings};
pub use schema::SettingSpec;

/// Parse `cloudguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CloudguardConfigV1> {
    let cfg: CloudguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the audit-wide config (cloud, user settings, disabled checks) from the file model
/// plus caller overrides. `known_checks` guards against typos in `[checks.*]` tables.
pub fn resolve_config(
    cfg: CloudguardConfigV1,
    overrides: Overrides,
    known_checks: &[&str],
) -> anyhow::Result<AuditConfig> {
    config::resolve_config(cfg, overrides, known_checks)
}
