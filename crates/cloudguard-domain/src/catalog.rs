use crate::checks;
use crate::model::{Check, CheckSpec};
use crate::triggers::RealtimeTriggerIndex;
use cloudguard_settings::ConfigurationError;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate check id: {0}")]
    DuplicateId(&'static str),
    #[error("check {check} is missing required field `{field}`")]
    MissingField {
        check: &'static str,
        field: &'static str,
    },
    #[error("check {0} declares no apis")]
    MissingApis(&'static str),
    #[error("check {check} declares setting {setting} twice")]
    DuplicateSetting {
        check: &'static str,
        setting: &'static str,
    },
    #[error("invalid setting in check {check}")]
    InvalidSetting {
        check: &'static str,
        #[source]
        source: ConfigurationError,
    },
    #[error("check {0} declares an empty realtime trigger")]
    EmptyTrigger(&'static str),
}

/// Validated set of checks, built once at load time.
pub struct Catalog {
    checks: Vec<Box<dyn Check>>,
    by_id: HashMap<&'static str, usize>,
    triggers: RealtimeTriggerIndex,
}

impl Catalog {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::new();
        for (i, check) in checks.iter().enumerate() {
            let spec = check.spec();
            validate_spec(spec)?;
            if by_id.insert(spec.id, i).is_some() {
                return Err(CatalogError::DuplicateId(spec.id));
            }
        }
        let triggers = RealtimeTriggerIndex::from_specs(checks.iter().map(|c| c.spec()));
        tracing::debug!(checks = checks.len(), "check catalog built");
        Ok(Self {
            checks,
            by_id,
            triggers,
        })
    }

    /// Every check compiled into this build.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(checks::builtin())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.by_id.get(id).map(|&i| self.checks[i].as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.spec().id).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn triggers(&self) -> &RealtimeTriggerIndex {
        &self.triggers
    }

    /// Checks to re-run for a resource-change event, in catalog order.
    pub fn checks_for_event(&self, event: &str) -> Vec<&dyn Check> {
        let ids = self.triggers.checks_for(event);
        self.iter().filter(|c| ids.contains(c.spec().id)).collect()
    }
}

fn validate_spec(spec: &'static CheckSpec) -> Result<(), CatalogError> {
    let required = [
        ("id", spec.id),
        ("title", spec.title),
        ("category", spec.category),
        ("domain", spec.domain),
        ("description", spec.description),
        ("recommended_action", spec.recommended_action),
        ("link", spec.link),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CatalogError::MissingField {
                check: spec.id,
                field,
            });
        }
    }

    if spec.apis.is_empty() {
        return Err(CatalogError::MissingApis(spec.id));
    }

    let mut names = BTreeSet::new();
    for setting in spec.settings {
        if !names.insert(setting.name) {
            return Err(CatalogError::DuplicateSetting {
                check: spec.id,
                setting: setting.name,
            });
        }
        setting
            .validate()
            .map_err(|source| CatalogError::InvalidSetting {
                check: spec.id,
                source,
            })?;
    }

    if spec.realtime_triggers.iter().any(|t| t.trim().is_empty()) {
        return Err(CatalogError::EmptyTrigger(spec.id));
    }

    Ok(())
}
