//! Stable identifiers for checks, settings and realtime events.
//!
//! `check_id` is a dotted namespace: `<category>.<rule>`.

// Checks
pub const CHECK_APPSERVICE_NODE_JS_VERSION: &str = "appservice.node_js_version";
pub const CHECK_AUTOMATION_ACCOUNT_MANAGED_IDENTITY: &str = "automation.account_managed_identity";

// Settings
pub const SETTING_LATEST_NODE_JS_VERSION: &str = "latestNodeJsVersion";
/// Reserved setting selecting government-cloud locations.
pub const SETTING_GOVCLOUD: &str = "govcloud";

// Resource types and operations as the collector names them.
pub const RESOURCE_WEB_APPS: &str = "webApps";
pub const RESOURCE_AUTOMATION_ACCOUNTS: &str = "automationAccounts";
pub const OP_LIST: &str = "list";
pub const OP_LIST_CONFIGURATIONS: &str = "listConfigurations";

// Realtime events
pub const EVENT_WEB_SITES_WRITE: &str = "microsoftweb:sites:write";
pub const EVENT_WEB_SITES_DELETE: &str = "microsoftweb:sites:delete";
pub const EVENT_AUTOMATION_ACCOUNTS_WRITE: &str = "microsoftautomation:automationaccounts:write";
pub const EVENT_AUTOMATION_ACCOUNTS_DELETE: &str = "microsoftautomation:automationaccounts:delete";
