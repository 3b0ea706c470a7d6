//! The `audit` use cases: run the catalog (or the subset affected by an event) over a snapshot.

use anyhow::Context;
use cloudguard_cache::CacheStore;
use cloudguard_domain::{CancelToken, Catalog, Check, CheckRunner};
use cloudguard_settings::{AuditConfig, CloudguardConfigV1, Overrides};
use rayon::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::report::{AuditReport, CheckReport, CheckStatus, SeverityCounts, compute_verdict};

/// Input for the audit use cases.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Collector snapshot.
    pub cache: &'a CacheStore,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Caller overrides.
    pub overrides: Overrides,
    /// Shared with the caller so it can abort the run (e.g. on timeout).
    pub cancel: CancelToken,
}

/// Output from the audit use cases.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: AuditReport,
    /// The resolved configuration used.
    pub config: AuditConfig,
}

/// Run every enabled check in the builtin catalog.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let catalog = Catalog::builtin().context("build check catalog")?;
    let config = resolve(&input, &catalog)?;
    let selected: Vec<&dyn Check> = catalog.iter().collect();
    let report = audit(&input, &config, &selected, None);
    Ok(AuditOutput { report, config })
}

/// Re-run only the enabled checks registered for a resource-change `event`.
///
/// Unknown events run nothing and yield an empty, passing report.
pub fn run_triggered(input: AuditInput<'_>, event: &str) -> anyhow::Result<AuditOutput> {
    let catalog = Catalog::builtin().context("build check catalog")?;
    let config = resolve(&input, &catalog)?;
    let selected = catalog.checks_for_event(event);
    info!(event, checks = selected.len(), "realtime trigger");
    let report = audit(&input, &config, &selected, Some(event.to_string()));
    Ok(AuditOutput { report, config })
}

fn resolve(input: &AuditInput<'_>, catalog: &Catalog) -> anyhow::Result<AuditConfig> {
    let cfg = if input.config_text.trim().is_empty() {
        CloudguardConfigV1::default()
    } else {
        cloudguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    cloudguard_settings::resolve_config(cfg, input.overrides.clone(), &catalog.ids())
        .context("resolve config")
}

fn audit(
    input: &AuditInput<'_>,
    config: &AuditConfig,
    selected: &[&dyn Check],
    trigger: Option<String>,
) -> AuditReport {
    let started_at = OffsetDateTime::now_utc();
    let runner = CheckRunner::new(input.cache)
        .with_cloud(config.cloud)
        .with_cancel(input.cancel.clone());

    let checks: Vec<CheckReport> = selected
        .par_iter()
        .filter(|check| config.is_enabled(check.spec().id))
        .map(|check| run_one(&runner, *check, config, input.cache))
        .collect();

    let counts = SeverityCounts::from_findings(checks.iter().flat_map(|c| c.findings.iter()));
    let verdict = compute_verdict(&counts, &checks);
    let finished_at = OffsetDateTime::now_utc();

    info!(
        checks = checks.len(),
        fail = counts.fail,
        unknown = counts.unknown,
        ?verdict,
        "audit finished"
    );

    AuditReport {
        started_at,
        finished_at,
        cloud: config.cloud,
        trigger,
        verdict,
        counts,
        checks,
    }
}

fn run_one(
    runner: &CheckRunner<'_>,
    check: &dyn Check,
    config: &AuditConfig,
    cache: &CacheStore,
) -> CheckReport {
    let spec = check.spec();
    let (status, findings, source) = match runner.run(check, &config.settings) {
        Ok(run) => {
            let status = if run.completed {
                CheckStatus::Completed
            } else {
                CheckStatus::Cancelled
            };
            (status, run.findings, run.source.to_value(cache))
        }
        Err(err) => {
            warn!(check_id = spec.id, error = %err, "check skipped: invalid settings");
            (
                CheckStatus::ConfigurationError {
                    message: err.to_string(),
                },
                Vec::new(),
                serde_json::Value::Object(Default::default()),
            )
        }
    };

    CheckReport {
        check_id: spec.id.to_string(),
        title: spec.title.to_string(),
        category: spec.category.to_string(),
        status,
        findings,
        source,
    }
}
