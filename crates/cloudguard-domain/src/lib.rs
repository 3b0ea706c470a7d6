//! Pure check evaluation (no IO).
//!
//! Input: a cache snapshot collected elsewhere plus flat user settings.
//! Output: findings and the record of cache entries each check consulted.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod checks;
pub mod fanout;
pub mod model;
pub mod regions;
pub mod runner;
pub mod sink;
pub mod triggers;
pub mod version;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogError};
pub use fanout::{CancelToken, for_each_location};
pub use model::{
    ApiCall, Check, CheckSpec, EvalError, Evaluation, Noun, Resource,
    ResourceContext, RiskLevel,
};
pub use runner::{CheckRun, CheckRunner};
pub use sink::ResultSink;
pub use triggers::RealtimeTriggerIndex;
pub use version::{InvalidVersionError, compare_versions, compare_versions_code};
