use crate::{fingerprint::fingerprint_for_finding, LocationId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized outcome of a check for one location or resource.
///
/// The numeric codes are stable and shared with downstream consumers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warn,
    Fail,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity code {0} (expected 0..=3)")]
pub struct SeverityCodeError(pub u8);

impl Severity {
    pub fn code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warn => 1,
            Severity::Fail => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, SeverityCodeError> {
        match code {
            0 => Ok(Severity::Ok),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Fail),
            3 => Ok(Severity::Unknown),
            other => Err(SeverityCodeError(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub message: String,
    pub location: LocationId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// Set when the user overrode at least one of the check's declared settings.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub custom: bool,

    /// Stable identifier intended for dedup and trending.
    pub fingerprint: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        check_id: &str,
        message: impl Into<String>,
        location: &LocationId,
        resource_id: Option<&str>,
        custom: bool,
    ) -> Self {
        let message = message.into();
        let fingerprint =
            fingerprint_for_finding(check_id, location.as_str(), resource_id, &message);
        Self {
            severity,
            check_id: check_id.to_string(),
            message,
            location: location.clone(),
            resource_id: resource_id.map(str::to_string),
            custom,
            fingerprint,
        }
    }
}
