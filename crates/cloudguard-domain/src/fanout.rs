use cloudguard_types::LocationId;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Cooperative cancellation shared between a caller and in-flight runs.
///
/// Cancelling stops locations that have not started; started locations finish.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run `body` for every location concurrently and return once all started bodies finished.
///
/// Returns `true` when every location ran, `false` when cancellation skipped some.
pub fn for_each_location<F>(locations: &[LocationId], cancel: &CancelToken, body: F) -> bool
where
    F: Fn(&LocationId) + Send + Sync,
{
    let skipped = AtomicUsize::new(0);

    locations.par_iter().for_each(|location| {
        if cancel.is_cancelled() {
            skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }
        body(location);
    });

    let skipped = skipped.into_inner();
    if skipped > 0 {
        tracing::debug!(skipped, total = locations.len(), "fan-out cancelled");
    }
    skipped == 0
}
