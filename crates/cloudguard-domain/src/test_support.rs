use crate::model::{ApiCall, Check, CheckSpec, EvalError, Evaluation, Noun, Resource, ResourceContext};
use crate::runner::{CheckRun, CheckRunner};
use cloudguard_cache::CacheStore;
use cloudguard_settings::UserSettings;
use cloudguard_types::{Finding, LocationId, Severity};

pub const EAST: &str = "eastus";
pub const WEST: &str = "westus";

const WIDGETS_LIST: &[ApiCall] = &[ApiCall::new("widgets", "list")];

pub fn base_spec(id: &'static str) -> CheckSpec {
    CheckSpec {
        id,
        title: "Test Check",
        category: "Test",
        domain: "Test",
        risk: None,
        description: "A check used in tests",
        more_info: "",
        recommended_action: "Nothing",
        link: "https://example.com",
        apis: WIDGETS_LIST,
        settings: &[],
        realtime_triggers: &[],
        noun: Noun {
            singular: "widget",
            plural: "widgets",
        },
        none_applicable: None,
    }
}

pub fn spec_with_triggers(id: &'static str, triggers: &'static [&'static str]) -> &'static CheckSpec {
    Box::leak(Box::new(CheckSpec {
        realtime_triggers: triggers,
        ..base_spec(id)
    }))
}

/// Check that reports OK for every resource.
pub struct StaticCheck(pub &'static CheckSpec);

impl Check for StaticCheck {
    fn spec(&self) -> &'static CheckSpec {
        self.0
    }

    fn evaluate(
        &self,
        _cx: &ResourceContext<'_>,
        resource: Resource<'_>,
    ) -> Result<Evaluation, EvalError> {
        Ok(Evaluation::ok(format!("{} ok", resource.id)))
    }
}

pub fn user(pairs: &[(&str, &str)]) -> UserSettings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn locations(names: &[&str]) -> Vec<LocationId> {
    names.iter().map(LocationId::new).collect()
}

/// Run `check` over the given locations with the given user settings.
pub fn run(check: &dyn Check, cache: &CacheStore, locs: &[&str], settings: &[(&str, &str)]) -> CheckRun {
    CheckRunner::new(cache)
        .with_locations(locations(locs))
        .run(check, &user(settings))
        .expect("settings resolve")
}

pub fn at<'f>(findings: &'f [Finding], location: &str) -> Vec<&'f Finding> {
    let location = LocationId::new(location);
    findings.iter().filter(|f| f.location == location).collect()
}

pub fn severities(findings: &[&Finding]) -> Vec<Severity> {
    findings.iter().map(|f| f.severity).collect()
}
