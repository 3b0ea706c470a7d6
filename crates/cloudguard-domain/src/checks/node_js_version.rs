use crate::model::{
    ApiCall, Check, CheckSpec, EvalError, Evaluation, Noun, Resource, ResourceContext, RiskLevel,
};
use crate::version::compare_versions;
use cloudguard_settings::SettingSpec;
use cloudguard_types::ids;
use serde_json::Value;
use std::cmp::Ordering;

const WEB_APPS_LIST: ApiCall = ApiCall::new(ids::RESOURCE_WEB_APPS, ids::OP_LIST);
const WEB_APP_CONFIGURATIONS: ApiCall =
    ApiCall::new(ids::RESOURCE_WEB_APPS, ids::OP_LIST_CONFIGURATIONS);

pub(crate) const LATEST_NODE_JS_VERSION: SettingSpec = SettingSpec {
    name: ids::SETTING_LATEST_NODE_JS_VERSION,
    display_name: "Latest Node.js Version",
    default: "20",
    description: "The latest Node.js version supported by Azure App Service.",
    regex: "[0-9.]{1,2}",
};

static SPEC: CheckSpec = CheckSpec {
    id: ids::CHECK_APPSERVICE_NODE_JS_VERSION,
    title: "Node.js Version",
    category: "App Service",
    domain: "Application Integration",
    risk: Some(RiskLevel::Low),
    description: "Ensures the latest version of Node.js is installed for all App Services",
    more_info: "Installing the latest version of Node.js will reduce the security risk of missing security patches.",
    recommended_action: "Select the latest version of Node.js for all Node.js-based App Services",
    link: "https://learn.microsoft.com/en-us/azure/app-service/configure-language-nodejs",
    apis: &[WEB_APPS_LIST, WEB_APP_CONFIGURATIONS],
    settings: &[LATEST_NODE_JS_VERSION],
    realtime_triggers: &[ids::EVENT_WEB_SITES_WRITE, ids::EVENT_WEB_SITES_DELETE],
    noun: Noun {
        singular: "App Service",
        plural: "App Services",
    },
    none_applicable: Some("No App Services with Node.js found"),
};

/// Flags App Services running a Node.js version below the configured baseline.
pub struct NodeJsVersion;

impl Check for NodeJsVersion {
    fn spec(&self) -> &'static CheckSpec {
        &SPEC
    }

    fn evaluate(
        &self,
        cx: &ResourceContext<'_>,
        _resource: Resource<'_>,
    ) -> Result<Evaluation, EvalError> {
        let Some(configs) = cx.secondary(WEB_APP_CONFIGURATIONS)? else {
            return Ok(Evaluation::NotApplicable);
        };
        let Some(version) = configs.first().and_then(node_version) else {
            return Ok(Evaluation::NotApplicable);
        };

        let baseline = cx.settings().value(&LATEST_NODE_JS_VERSION);
        let ordering = compare_versions(&version, baseline).map_err(|err| {
            EvalError::Predicate(format!(
                "Unable to compare the Node.js version ({version}): {err}"
            ))
        })?;

        Ok(match ordering {
            Ordering::Less => Evaluation::fail(format!(
                "The Node.js version ({version}) is not the latest version"
            )),
            Ordering::Equal | Ordering::Greater => Evaluation::ok(format!(
                "The Node.js version ({version}) is the latest version"
            )),
        })
    }
}

/// Node.js version configured for a site, from `linuxFxVersion` (`NODE|18-lts`) first and the
/// Windows `nodeVersion` (`~20`) otherwise. Only a `NODE` runtime segment counts, so container
/// images such as `DOCKER|node:18-alpine` are not Node.js sites.
fn node_version(config: &Value) -> Option<String> {
    let linux = config
        .get("linuxFxVersion")
        .and_then(Value::as_str)
        .and_then(|fx| fx.split_once('|'))
        .filter(|(runtime, _)| runtime.trim().eq_ignore_ascii_case("NODE"))
        .map(|(_, version)| version.to_ascii_lowercase().replace("-lts", ""));
    if linux.is_some() {
        return linux;
    }

    config
        .get("nodeVersion")
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(|v| v.replace('~', ""))
}
