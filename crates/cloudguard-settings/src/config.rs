use crate::{UserSettings, model::CloudguardConfigV1};
use anyhow::bail;
use cloudguard_types::{Cloud, ids};
use std::collections::BTreeSet;

/// Caller-side overrides (typically from flags) applied on top of the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub govcloud: Option<bool>,
    pub settings: UserSettings,
}

/// Audit-wide configuration shared by every check in a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditConfig {
    pub cloud: Cloud,
    pub settings: UserSettings,
    pub disabled_checks: BTreeSet<String>,
}

impl AuditConfig {
    pub fn is_enabled(&self, check_id: &str) -> bool {
        !self.disabled_checks.contains(check_id)
    }
}

pub fn resolve_config(
    cfg: CloudguardConfigV1,
    overrides: Overrides,
    known_checks: &[&str],
) -> anyhow::Result<AuditConfig> {
    let mut settings = cfg.settings;
    settings.extend(overrides.settings);

    let govcloud = match overrides.govcloud.or(cfg.govcloud) {
        Some(v) => v,
        None => match settings.get(ids::SETTING_GOVCLOUD) {
            Some(raw) => parse_bool(ids::SETTING_GOVCLOUD, raw)?,
            None => false,
        },
    };

    let mut disabled_checks = BTreeSet::new();
    for (check_id, cc) in &cfg.checks {
        if !known_checks.contains(&check_id.as_str()) {
            bail!("unknown check in config: {check_id}");
        }
        if cc.enabled == Some(false) {
            disabled_checks.insert(check_id.clone());
        }
    }

    Ok(AuditConfig {
        cloud: Cloud::from_govcloud(govcloud),
        settings,
        disabled_checks,
    })
}

fn parse_bool(name: &str, v: &str) -> anyhow::Result<bool> {
    match v {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => bail!("invalid boolean for {name}: {other} (expected true|false)"),
    }
}
