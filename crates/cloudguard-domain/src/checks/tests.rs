use crate::fanout::CancelToken;
use crate::model::{Check, CheckSpec, EvalError, Evaluation, Resource, ResourceContext};
use crate::runner::CheckRunner;
use crate::test_support::{EAST, WEST, at, base_spec, locations, run, severities, user};
use cloudguard_cache::CacheKey;
use cloudguard_test_util::{CacheBuilder, automation_account, web_app};
use cloudguard_types::{Cloud, LocationId, Severity, ids};
use serde_json::json;

#[cfg(feature = "check-automation-account-managed-identity")]
use super::AutomationAccountManagedIdentity;
#[cfg(feature = "check-node-js-version")]
use super::NodeJsVersion;

const WEB: &str = ids::RESOURCE_WEB_APPS;
const LIST: &str = ids::OP_LIST;
const CONFIGS: &str = ids::OP_LIST_CONFIGURATIONS;

#[cfg(feature = "check-node-js-version")]
#[test]
fn node_versions_below_baseline_fail_and_current_ones_pass() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a"), web_app("/sites/b")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "NODE|18-lts"}]))
        .resource(WEB, CONFIGS, EAST, "/sites/b", json!([{"nodeVersion": "~20"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert!(out.completed);
    assert_eq!(out.findings.len(), 2);

    let a = &out.findings[0];
    assert_eq!(a.severity, Severity::Fail);
    assert_eq!(a.resource_id.as_deref(), Some("/sites/a"));
    assert!(a.message.contains("(18)"));
    assert!(!a.custom);

    let b = &out.findings[1];
    assert_eq!(b.severity, Severity::Ok);
    assert_eq!(b.resource_id.as_deref(), Some("/sites/b"));
    assert!(b.message.contains("(20)"));
    assert_eq!(b.check_id, ids::CHECK_APPSERVICE_NODE_JS_VERSION);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn absent_listing_produces_no_findings() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST, WEST], &[]);

    assert!(at(&out.findings, WEST).is_empty());
    assert_eq!(at(&out.findings, EAST).len(), 1);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn listing_error_produces_exactly_one_unknown() {
    let cache = CacheBuilder::new()
        .listing_error(WEB, LIST, EAST, "AuthorizationFailed")
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Unknown]);
    assert_eq!(
        out.findings[0].message,
        "Unable to query for App Services: AuthorizationFailed"
    );
    assert_eq!(out.findings[0].resource_id, None);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn empty_listing_produces_one_ok() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].severity, Severity::Ok);
    assert_eq!(out.findings[0].message, "No existing App Services found");
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn no_node_sites_produce_one_none_applicable_ok() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a"), web_app("/sites/b")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "DOTNETCORE|8.0"}]))
        .resource(WEB, CONFIGS, EAST, "/sites/b", json!([{"linuxFxVersion": "PYTHON|3.12"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].severity, Severity::Ok);
    assert_eq!(out.findings[0].message, "No App Services with Node.js found");
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn container_images_named_after_node_are_not_node_sites() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "DOCKER|node:18-alpine"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Ok]);
    assert_eq!(out.findings[0].message, "No App Services with Node.js found");
    assert_eq!(out.findings[0].resource_id, None);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn source_record_holds_exactly_the_keys_consulted() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a"), web_app("/sites/b")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"nodeVersion": "~20"}]))
        .listing(WEB, LIST, "northeurope", json!([]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    let east = LocationId::new(EAST);
    let listing = CacheKey::listing(WEB, LIST, east.clone());
    let config_a = CacheKey::for_resource(WEB, CONFIGS, east.clone(), "/sites/a");
    let config_b = CacheKey::for_resource(WEB, CONFIGS, east, "/sites/b");

    assert_eq!(out.source.len(), 2);
    assert!(out.source.contains(&listing));
    assert!(out.source.contains(&config_a));
    assert!(!out.source.contains(&config_b));

    // Site b has no collected configuration yet: skipped without a finding.
    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].resource_id.as_deref(), Some("/sites/a"));
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn secondary_error_is_unknown_for_that_resource_and_scan_continues() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a"), web_app("/sites/b")]))
        .resource_error(WEB, CONFIGS, EAST, "/sites/a", "ResourceNotFound")
        .resource(WEB, CONFIGS, EAST, "/sites/b", json!([{"nodeVersion": "~18"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Unknown, Severity::Fail]);
    assert_eq!(
        out.findings[0].message,
        "Unable to query App Service: ResourceNotFound"
    );
    assert_eq!(out.findings[0].resource_id.as_deref(), Some("/sites/a"));
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn secondary_error_alone_still_reports_none_applicable() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .resource_error(WEB, CONFIGS, EAST, "/sites/a", "denied")
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Unknown, Severity::Ok]);
    assert_eq!(out.findings[1].message, "No App Services with Node.js found");
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn malformed_version_is_unknown_and_counts_as_applicable() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a"), web_app("/sites/b")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "NODE|lts"}]))
        .resource(WEB, CONFIGS, EAST, "/sites/b", json!([{"nodeVersion": "~22"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Unknown, Severity::Ok]);
    assert!(out.findings[0].message.starts_with("Unable to compare the Node.js version (lts)"));
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn user_baseline_marks_resource_findings_custom() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "NODE|18-lts"}]))
        .listing(WEB, LIST, WEST, json!([]))
        .build();

    let out = run(
        &NodeJsVersion,
        &cache,
        &[EAST, WEST],
        &[(ids::SETTING_LATEST_NODE_JS_VERSION, "18")],
    );

    let east = at(&out.findings, EAST);
    assert_eq!(severities(&east), [Severity::Ok]);
    assert!(east[0].custom);

    let west = at(&out.findings, WEST);
    assert_eq!(severities(&west), [Severity::Ok]);
    assert!(!west[0].custom);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn override_equal_to_default_is_not_custom() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"nodeVersion": "~20"}]))
        .build();

    let out = run(
        &NodeJsVersion,
        &cache,
        &[EAST],
        &[(ids::SETTING_LATEST_NODE_JS_VERSION, "20")],
    );
    assert!(!out.findings[0].custom);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn empty_override_falls_back_to_the_default() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .resource(WEB, CONFIGS, EAST, "/sites/a", json!([{"linuxFxVersion": "NODE|18-lts"}]))
        .build();

    let out = run(
        &NodeJsVersion,
        &cache,
        &[EAST],
        &[(ids::SETTING_LATEST_NODE_JS_VERSION, "")],
    );

    assert_eq!(severities(&at(&out.findings, EAST)), [Severity::Fail]);
    assert!(!out.findings[0].custom);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn invalid_setting_aborts_before_any_location() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([web_app("/sites/a")]))
        .build();

    let err = CheckRunner::new(&cache)
        .with_locations(locations(&[EAST]))
        .run(
            &NodeJsVersion,
            &user(&[(ids::SETTING_LATEST_NODE_JS_VERSION, "abc")]),
        )
        .expect_err("abc is not a version");
    assert!(err.to_string().contains(ids::SETTING_LATEST_NODE_JS_VERSION));
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn resources_without_id_are_skipped() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([{"name": "orphan"}]))
        .build();

    let out = run(&NodeJsVersion, &cache, &[EAST], &[]);

    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].message, "No App Services with Node.js found");
    assert_eq!(out.source.len(), 1);
}

#[cfg(feature = "check-node-js-version")]
#[test]
fn government_cloud_uses_government_regions() {
    let cache = CacheBuilder::new()
        .listing(WEB, LIST, EAST, json!([]))
        .listing(WEB, LIST, "usgovvirginia", json!([]))
        .build();

    let out = CheckRunner::new(&cache)
        .with_cloud(Cloud::Government)
        .run(&NodeJsVersion, &user(&[]))
        .expect("run");

    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].location, LocationId::new("usgovvirginia"));
}

#[cfg(feature = "check-automation-account-managed-identity")]
#[test]
fn automation_accounts_need_a_managed_identity() {
    const AUTOMATION: &str = ids::RESOURCE_AUTOMATION_ACCOUNTS;
    let cache = CacheBuilder::new()
        .listing(
            AUTOMATION,
            LIST,
            EAST,
            json!([
                automation_account("/aa/system", Some("SystemAssigned")),
                automation_account("/aa/both", Some("SystemAssigned, UserAssigned")),
                automation_account("/aa/none", Some("None")),
                automation_account("/aa/missing", None),
            ]),
        )
        .listing(AUTOMATION, LIST, WEST, json!([]))
        .build();

    let out = run(&AutomationAccountManagedIdentity, &cache, &[EAST, WEST], &[]);

    assert_eq!(
        severities(&at(&out.findings, EAST)),
        [Severity::Ok, Severity::Ok, Severity::Fail, Severity::Fail]
    );
    let west = at(&out.findings, WEST);
    assert_eq!(west.len(), 1);
    assert_eq!(west[0].message, "No existing Automation accounts found");
}

#[cfg(feature = "check-automation-account-managed-identity")]
#[test]
fn automation_accounts_without_ids_produce_nothing() {
    let cache = CacheBuilder::new()
        .listing(ids::RESOURCE_AUTOMATION_ACCOUNTS, LIST, EAST, json!([{"name": "x"}]))
        .build();

    let out = run(&AutomationAccountManagedIdentity, &cache, &[EAST], &[]);
    assert!(out.findings.is_empty());
}

/// Cancels the shared token the first time it evaluates a resource.
struct CancellingCheck {
    spec: &'static CheckSpec,
    cancel: CancelToken,
}

impl Check for CancellingCheck {
    fn spec(&self) -> &'static CheckSpec {
        self.spec
    }

    fn evaluate(
        &self,
        _cx: &ResourceContext<'_>,
        resource: Resource<'_>,
    ) -> Result<Evaluation, EvalError> {
        self.cancel.cancel();
        Ok(Evaluation::ok(format!("{} seen", resource.id)))
    }
}

#[test]
fn cancelled_runs_keep_findings_of_started_locations() {
    let names: Vec<String> = (0..8).map(|i| format!("region{i}")).collect();
    let mut builder = CacheBuilder::new();
    for name in &names {
        builder = builder.listing("widgets", "list", name, json!([{"id": format!("/w/{name}")}]));
    }
    let cache = builder.build();

    let cancel = CancelToken::new();
    let check = CancellingCheck {
        spec: Box::leak(Box::new(base_spec("test.cancelling"))),
        cancel: cancel.clone(),
    };
    let locs: Vec<&str> = names.iter().map(String::as_str).collect();
    let runner = CheckRunner::new(&cache)
        .with_locations(locations(&locs))
        .with_cancel(cancel);

    // One worker runs locations one at a time, so the first evaluation cancels every later one.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .expect("thread pool");
    let out = pool
        .install(|| runner.run(&check, &user(&[])))
        .expect("run");

    assert!(!out.completed);
    assert_eq!(out.findings.len(), 1);
    assert_eq!(out.findings[0].severity, Severity::Ok);

    let started = &out.findings[0].location;
    assert_eq!(out.source.len(), 1);
    assert!(out.source.contains(&CacheKey::listing("widgets", "list", started.clone())));
    assert_eq!(
        out.findings[0].resource_id.as_deref(),
        Some(format!("/w/{started}").as_str())
    );
}

#[test]
fn pre_cancelled_run_returns_no_findings() {
    let cache = CacheBuilder::new()
        .listing("widgets", "list", EAST, json!([{"id": "/w/1"}]))
        .build();
    let cancel = CancelToken::new();
    cancel.cancel();

    let spec: &'static CheckSpec = Box::leak(Box::new(base_spec("test.static")));
    let out = CheckRunner::new(&cache)
        .with_locations(locations(&[EAST]))
        .with_cancel(cancel)
        .run(&crate::test_support::StaticCheck(spec), &user(&[]))
        .expect("run");

    assert!(!out.completed);
    assert!(out.findings.is_empty());
    assert!(out.source.is_empty());
}
