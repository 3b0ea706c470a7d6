use crate::model::{
    ApiCall, Check, CheckSpec, EvalError, Evaluation, Noun, Resource, ResourceContext,
};
use cloudguard_types::ids;
use serde_json::Value;

const AUTOMATION_ACCOUNTS_LIST: ApiCall =
    ApiCall::new(ids::RESOURCE_AUTOMATION_ACCOUNTS, ids::OP_LIST);

static SPEC: CheckSpec = CheckSpec {
    id: ids::CHECK_AUTOMATION_ACCOUNT_MANAGED_IDENTITY,
    title: "Automation Account Managed Identity",
    category: "Automation",
    domain: "Management and Governance",
    risk: None,
    description: "Ensures that Azure Automation accounts have managed identity enabled.",
    more_info: "Managed identities let runbooks authenticate to Azure resources without storing credentials in the account.",
    recommended_action: "Enable a system-assigned or user-assigned managed identity for all Automation accounts.",
    link: "https://learn.microsoft.com/en-us/azure/automation/enable-managed-identity-for-automation",
    apis: &[AUTOMATION_ACCOUNTS_LIST],
    settings: &[],
    realtime_triggers: &[
        ids::EVENT_AUTOMATION_ACCOUNTS_WRITE,
        ids::EVENT_AUTOMATION_ACCOUNTS_DELETE,
    ],
    noun: Noun {
        singular: "Automation account",
        plural: "Automation accounts",
    },
    none_applicable: None,
};

pub struct AutomationAccountManagedIdentity;

impl Check for AutomationAccountManagedIdentity {
    fn spec(&self) -> &'static CheckSpec {
        &SPEC
    }

    fn evaluate(
        &self,
        _cx: &ResourceContext<'_>,
        resource: Resource<'_>,
    ) -> Result<Evaluation, EvalError> {
        let identity = resource
            .record
            .get("identity")
            .and_then(|i| i.get("type"))
            .and_then(Value::as_str)
            .map(str::to_ascii_lowercase);

        let managed = identity
            .as_deref()
            .is_some_and(|t| t.contains("systemassigned") || t.contains("userassigned"));

        Ok(if managed {
            Evaluation::ok("Automation account has managed identity enabled")
        } else {
            Evaluation::fail("Automation account does not have managed identity enabled")
        })
    }
}
