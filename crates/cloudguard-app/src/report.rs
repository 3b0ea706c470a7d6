use cloudguard_types::{Cloud, Finding, Severity};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub ok: u32,
    pub warn: u32,
    pub fail: u32,
    pub unknown: u32,
}

impl SeverityCounts {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Ok => counts.ok += 1,
                Severity::Warn => counts.warn += 1,
                Severity::Fail => counts.fail += 1,
                Severity::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Completed,
    /// Cancellation skipped some locations; the findings present are still valid.
    Cancelled,
    ConfigurationError { message: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckReport {
    pub check_id: String,
    pub title: String,
    pub category: String,
    #[serde(flatten)]
    pub status: CheckStatus,
    pub findings: Vec<Finding>,
    /// Consulted cache entries in the collector's nested shape.
    pub source: Value,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub cloud: Cloud,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    pub verdict: Verdict,
    pub counts: SeverityCounts,
    pub checks: Vec<CheckReport>,
}

impl AuditReport {
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.checks.iter().flat_map(|c| c.findings.iter())
    }

    pub fn check(&self, check_id: &str) -> Option<&CheckReport> {
        self.checks.iter().find(|c| c.check_id == check_id)
    }
}

/// Fail on any FAIL finding; warn on WARN, UNKNOWN or a check that could not run.
pub fn compute_verdict(counts: &SeverityCounts, checks: &[CheckReport]) -> Verdict {
    if counts.fail > 0 {
        return Verdict::Fail;
    }
    let config_errors = checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::ConfigurationError { .. }));
    if counts.warn > 0 || counts.unknown > 0 || config_errors {
        return Verdict::Warn;
    }
    Verdict::Pass
}
