use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version {version:?}: component {component:?} is not a number")]
pub struct InvalidVersionError {
    pub version: String,
    pub component: String,
}

/// Compare two dotted version strings component by component.
///
/// Components compare numerically (`9 < 10`) and a missing trailing component counts as `0`,
/// so `20` equals `20.0.0`.
pub fn compare_versions(actual: &str, baseline: &str) -> Result<Ordering, InvalidVersionError> {
    let a = parse_components(actual)?;
    let b = parse_components(baseline)?;

    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}

/// [`compare_versions`] as `-1`, `0` or `1`.
pub fn compare_versions_code(actual: &str, baseline: &str) -> Result<i8, InvalidVersionError> {
    compare_versions(actual, baseline).map(|o| o as i8)
}

fn parse_components(version: &str) -> Result<Vec<u64>, InvalidVersionError> {
    version
        .split('.')
        .map(|component| {
            let invalid = || InvalidVersionError {
                version: version.to_string(),
                component: component.to_string(),
            };
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            component.parse::<u64>().map_err(|_| invalid())
        })
        .collect()
}
