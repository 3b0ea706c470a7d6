use crate::model::Check;

#[cfg(feature = "check-automation-account-managed-identity")]
mod automation_account_managed_identity;
#[cfg(feature = "check-node-js-version")]
mod node_js_version;

#[cfg(feature = "check-automation-account-managed-identity")]
pub use automation_account_managed_identity::AutomationAccountManagedIdentity;
#[cfg(feature = "check-node-js-version")]
pub use node_js_version::NodeJsVersion;

#[cfg(test)]
mod tests;

/// Every check compiled into this build, in a stable order.
pub fn builtin() -> Vec<Box<dyn Check>> {
    #[allow(unused_mut)]
    let mut checks: Vec<Box<dyn Check>> = Vec::new();
    #[cfg(feature = "check-node-js-version")]
    checks.push(Box::new(NodeJsVersion));
    #[cfg(feature = "check-automation-account-managed-identity")]
    checks.push(Box::new(AutomationAccountManagedIdentity));
    checks
}
