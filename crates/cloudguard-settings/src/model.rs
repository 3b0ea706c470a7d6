use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `cloudguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CloudguardConfigV1 {
    /// Optional schema string for tooling (`cloudguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Enumerate government-cloud locations instead of public ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub govcloud: Option<bool>,

    /// Flat setting overrides shared by every check (e.g. `latestNodeJsVersion = "20"`).
    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Disable a check without removing it from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
