//! Orchestration of one check execution over a cache snapshot.

use crate::fanout::{CancelToken, for_each_location};
use crate::model::{Check, CheckSpec, EvalError, Evaluation, Resource, ResourceContext};
use crate::regions;
use crate::sink::ResultSink;
use cloudguard_cache::{CacheKey, CacheStore, SourceRecord, SourceTracker, resolve};
use cloudguard_settings::{
    ConfigurationError, ResolvedSettings, UserSettings, is_custom, resolve_settings,
};
use cloudguard_types::{Cloud, Finding, LocationId, Severity};
use tracing::{debug, info_span};

/// Result of one check execution.
#[derive(Clone, Debug)]
pub struct CheckRun {
    pub check_id: &'static str,
    pub findings: Vec<Finding>,
    pub source: SourceRecord,
    /// `false` when cancellation skipped at least one location. Findings of the locations that
    /// did run are still valid.
    pub completed: bool,
}

/// Runs checks against one read-only cache snapshot.
#[derive(Clone, Debug)]
pub struct CheckRunner<'c> {
    cache: &'c CacheStore,
    cloud: Cloud,
    locations: Option<Vec<LocationId>>,
    cancel: CancelToken,
}

impl<'c> CheckRunner<'c> {
    pub fn new(cache: &'c CacheStore) -> Self {
        Self {
            cache,
            cloud: Cloud::Public,
            locations: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cloud(mut self, cloud: Cloud) -> Self {
        self.cloud = cloud;
        self
    }

    /// Use a fixed location set instead of the per-resource-type region table.
    pub fn with_locations(mut self, locations: Vec<LocationId>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute `check` once.
    ///
    /// Settings resolve before any location is processed; an invalid override aborts this
    /// check only. Data problems never fail the run, they become findings.
    pub fn run(&self, check: &dyn Check, user: &UserSettings) -> Result<CheckRun, ConfigurationError> {
        let spec = check.spec();
        let span = info_span!("check", check_id = spec.id);
        let _entered = span.enter();

        let settings = resolve_settings(spec.settings, user)?;
        let custom = is_custom(spec.settings, user);

        let sink = ResultSink::new();
        let tracker = SourceTracker::new();

        let completed = match spec.primary_api() {
            Some(_) => {
                let locations = self.locations_for(spec);
                let scan = LocationScan {
                    check,
                    spec,
                    settings: &settings,
                    custom,
                    cache: self.cache,
                    tracker: &tracker,
                    sink: &sink,
                };
                for_each_location(&locations, &self.cancel, |location| {
                    let _entered = span.enter();
                    scan.run(location)
                })
            }
            None => true,
        };

        let findings = sink.into_findings();
        debug!(findings = findings.len(), completed, custom, "check finished");

        Ok(CheckRun {
            check_id: spec.id,
            findings,
            source: tracker.into_record(),
            completed,
        })
    }

    fn locations_for(&self, spec: &CheckSpec) -> Vec<LocationId> {
        match (&self.locations, spec.primary_api()) {
            (Some(fixed), _) => fixed.clone(),
            (None, Some(api)) => regions::locations_for(api.resource_type, self.cloud),
            (None, None) => Vec::new(),
        }
    }
}

/// Shared, read-only state of one check's fan-out.
struct LocationScan<'a> {
    check: &'a dyn Check,
    spec: &'static CheckSpec,
    settings: &'a ResolvedSettings,
    custom: bool,
    cache: &'a CacheStore,
    tracker: &'a SourceTracker,
    sink: &'a ResultSink,
}

impl LocationScan<'_> {
    fn run(&self, location: &LocationId) {
        let Some(api) = self.spec.primary_api() else {
            return;
        };
        let noun = self.spec.noun;
        let key = CacheKey::listing(api.resource_type, api.operation, location.clone());

        let Some(entry) = resolve(self.cache, self.tracker, &key) else {
            debug!(%key, "listing not collected; skipping location");
            return;
        };

        let records = match entry.payload() {
            Ok(records) => records,
            Err(err) => {
                self.emit(
                    Severity::Unknown,
                    format!("Unable to query for {}: {err}", noun.plural),
                    location,
                    None,
                    false,
                );
                return;
            }
        };

        if records.is_empty() {
            self.emit(
                Severity::Ok,
                format!("No existing {} found", noun.plural),
                location,
                None,
                false,
            );
            return;
        }

        let mut applicable = false;
        for record in records {
            let Some(resource) = Resource::from_record(record) else {
                debug!(%key, "resource without id; skipping");
                continue;
            };
            let cx = ResourceContext {
                location,
                resource_id: resource.id,
                settings: self.settings,
                cache: self.cache,
                tracker: self.tracker,
            };

            match self.check.evaluate(&cx, resource) {
                Ok(Evaluation::NotApplicable) => {}
                Ok(Evaluation::Finding { severity, message }) => {
                    applicable = true;
                    self.emit(severity, message, location, Some(resource.id), self.custom);
                }
                Err(EvalError::Data(err)) => {
                    self.emit(
                        Severity::Unknown,
                        format!("Unable to query {}: {err}", noun.singular),
                        location,
                        Some(resource.id),
                        false,
                    );
                }
                Err(EvalError::Predicate(message)) => {
                    applicable = true;
                    self.emit(
                        Severity::Unknown,
                        message,
                        location,
                        Some(resource.id),
                        self.custom,
                    );
                }
            }
        }

        if !applicable && let Some(message) = self.spec.none_applicable {
            self.emit(Severity::Ok, message, location, None, false);
        }
    }

    fn emit(
        &self,
        severity: Severity,
        message: impl Into<String>,
        location: &LocationId,
        resource_id: Option<&str>,
        custom: bool,
    ) {
        self.sink.push(Finding::new(
            severity,
            self.spec.id,
            message,
            location,
            resource_id,
            custom,
        ));
    }
}
