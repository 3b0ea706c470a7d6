//! The `explain` use case: look up a check's guidance, settings and triggers.

use cloudguard_domain::{Catalog, CheckSpec};

/// Output from the explain use case.
#[derive(Debug)]
pub enum ExplainOutput {
    Found(&'static CheckSpec),
    /// Unknown identifier; includes the available check ids.
    NotFound {
        identifier: String,
        available_check_ids: Vec<&'static str>,
    },
}

pub fn run_explain(catalog: &Catalog, identifier: &str) -> ExplainOutput {
    match catalog.get(identifier) {
        Some(check) => ExplainOutput::Found(check.spec()),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: catalog.ids(),
        },
    }
}

/// Format a check's guidance for terminal display.
pub fn format_explanation(spec: &CheckSpec) -> String {
    let mut out = String::new();

    out.push_str(spec.title);
    out.push('\n');
    out.push_str(&"=".repeat(spec.title.len()));
    out.push_str("\n\n");
    out.push_str(&format!("{} / {} ({})\n\n", spec.category, spec.domain, spec.id));
    out.push_str(spec.description);
    out.push_str("\n\n");
    if !spec.more_info.is_empty() {
        out.push_str(spec.more_info);
        out.push_str("\n\n");
    }
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(spec.recommended_action);
    out.push('\n');
    out.push_str(spec.link);
    out.push('\n');

    if !spec.settings.is_empty() {
        out.push_str("\nSettings\n");
        out.push_str("--------\n");
        for s in spec.settings {
            out.push_str(&format!(
                "  - {} (default {:?}, pattern /{}/): {}\n",
                s.name, s.default, s.regex, s.description
            ));
        }
    }

    if !spec.realtime_triggers.is_empty() {
        out.push_str("\nRealtime triggers\n");
        out.push_str("-----------------\n");
        for t in spec.realtime_triggers {
            out.push_str(&format!("  - {t}\n"));
        }
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, check_ids: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check_id: {}\n\n", identifier));
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {}\n", id));
    }

    out
}

#[cfg(all(test, feature = "check-node-js-version"))]
mod tests {
    use super::*;
    use cloudguard_types::ids;

    #[test]
    fn explain_known_check_lists_settings_and_triggers() {
        let catalog = Catalog::builtin().expect("catalog");
        let ExplainOutput::Found(spec) = run_explain(&catalog, ids::CHECK_APPSERVICE_NODE_JS_VERSION)
        else {
            panic!("node check should be known");
        };
        let text = format_explanation(spec);
        assert!(text.starts_with("Node.js Version\n==============="));
        assert!(text.contains("latestNodeJsVersion (default \"20\""));
        assert!(text.contains(ids::EVENT_WEB_SITES_WRITE));
    }

    #[test]
    fn explain_unknown_lists_available_ids() {
        let catalog = Catalog::builtin().expect("catalog");
        match run_explain(&catalog, "nope") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
            } => {
                let text = format_not_found(&identifier, &available_check_ids);
                assert!(text.contains("Unknown check_id: nope"));
                assert!(text.contains(ids::CHECK_APPSERVICE_NODE_JS_VERSION));
            }
            ExplainOutput::Found(_) => panic!("unexpected match"),
        }
    }
}
