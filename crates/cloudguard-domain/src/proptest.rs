//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Version comparison (zero padding, antisymmetry, numeric ordering)
//! - Location fan-out outcomes for arbitrary listings

use crate::test_support::{StaticCheck, base_spec, run};
use crate::version::compare_versions;
use cloudguard_test_util::CacheBuilder;
use cloudguard_types::Severity;
use proptest::prelude::*;
use serde_json::json;
use std::cmp::Ordering;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Dotted version with 1-4 numeric components.
fn arb_components() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..1000, 1..=4)
}

fn render(components: &[u32]) -> String {
    components
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

proptest! {
    #[test]
    fn zero_padding_never_changes_the_result(v in arb_components(), pad in 0usize..3) {
        let mut padded = v.clone();
        padded.extend(std::iter::repeat_n(0, pad));
        prop_assert_eq!(compare_versions(&render(&v), &render(&padded)), Ok(Ordering::Equal));
        prop_assert_eq!(compare_versions(&render(&padded), &render(&v)), Ok(Ordering::Equal));
    }

    #[test]
    fn comparison_is_antisymmetric(a in arb_components(), b in arb_components()) {
        let ab = compare_versions(&render(&a), &render(&b)).expect("numeric");
        let ba = compare_versions(&render(&b), &render(&a)).expect("numeric");
        prop_assert_eq!(ab, ba.reverse());
    }

    #[test]
    fn single_components_compare_as_integers(x in 0u32..100_000, y in 0u32..100_000) {
        prop_assert_eq!(compare_versions(&x.to_string(), &y.to_string()), Ok(x.cmp(&y)));
    }

    #[test]
    fn every_listed_resource_yields_one_finding(n in 0usize..20) {
        let records: Vec<_> = (0..n).map(|i| json!({"id": format!("/w/{i}")})).collect();
        let cache = CacheBuilder::new()
            .listing("widgets", "list", "eastus", json!(records))
            .build();
        let spec = Box::leak(Box::new(base_spec("prop.static")));

        let out = run(&StaticCheck(spec), &cache, &["eastus"], &[]);

        if n == 0 {
            prop_assert_eq!(out.findings.len(), 1);
            prop_assert_eq!(out.findings[0].message.as_str(), "No existing widgets found");
        } else {
            prop_assert_eq!(out.findings.len(), n);
            prop_assert!(out.findings.iter().all(|f| f.severity == Severity::Ok));
            for (i, f) in out.findings.iter().enumerate() {
                let expected = format!("/w/{i}");
                prop_assert_eq!(f.resource_id.as_deref(), Some(expected.as_str()));
            }
        }
    }
}
