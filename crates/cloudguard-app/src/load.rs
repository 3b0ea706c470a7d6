//! File loading for cache snapshots and config.

use anyhow::Context;
use camino::Utf8Path;
use cloudguard_cache::CacheStore;

/// Read and parse a collector snapshot.
pub fn read_cache_file(path: &Utf8Path) -> anyhow::Result<CacheStore> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read cache {path}"))?;
    CacheStore::from_json_str(&text).with_context(|| format!("load cache {path}"))
}

/// Read a config file; a missing file yields an empty string so defaults apply.
pub fn read_config_file(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(%path, "config file not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config {path}")),
    }
}
