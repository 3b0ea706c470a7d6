use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical location (region, subscription or equivalent partition) identifier.
///
/// Normalization rules are intentionally simple and deterministic:
/// - ASCII lowercase
/// - surrounding whitespace trimmed, inner spaces removed (`East US` -> `eastus`)
/// - never empty (an empty input becomes `global`)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub const GLOBAL: &'static str = "global";

    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let v: String = s
            .as_ref()
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if v.is_empty() {
            return Self(Self::GLOBAL.to_string());
        }
        Self(v)
    }

    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment cloud a run enumerates locations for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    #[default]
    Public,
    Government,
}

impl Cloud {
    pub fn from_govcloud(govcloud: bool) -> Self {
        if govcloud {
            Cloud::Government
        } else {
            Cloud::Public
        }
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        LocationId::new(value)
    }
}
