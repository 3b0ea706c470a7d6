use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - location
/// - resource id (if present)
/// - message
pub fn fingerprint_for_finding(
    check_id: &str,
    location: &str,
    resource_id: Option<&str>,
    message: &str,
) -> String {
    let mut parts = vec![check_id, location];
    if let Some(id) = resource_id {
        parts.push(id);
    }
    parts.push(message);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
