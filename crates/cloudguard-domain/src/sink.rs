use cloudguard_types::Finding;
use std::sync::{Mutex, PoisonError};

/// Append-only finding collector shared by concurrently running locations.
///
/// Appends from one thread keep their relative order.
#[derive(Debug, Default)]
pub struct ResultSink {
    findings: Mutex<Vec<Finding>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, finding: Finding) {
        self.findings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(finding);
    }

    pub fn len(&self) -> usize {
        self.findings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the findings appended so far.
    pub fn snapshot(&self) -> Vec<Finding> {
        self.findings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_types::{LocationId, Severity};
    use rayon::prelude::*;

    #[test]
    fn concurrent_appends_keep_per_thread_order() {
        let sink = ResultSink::new();
        let locations: Vec<LocationId> = (0..16)
            .map(|i| LocationId::new(format!("loc{i}")))
            .collect();

        locations.par_iter().for_each(|loc| {
            for n in 0..10 {
                sink.push(Finding::new(
                    Severity::Ok,
                    "test.check",
                    format!("{n}"),
                    loc,
                    None,
                    false,
                ));
            }
        });

        let findings = sink.into_findings();
        assert_eq!(findings.len(), 160);
        for loc in &locations {
            let seq: Vec<&str> = findings
                .iter()
                .filter(|f| &f.location == loc)
                .map(|f| f.message.as_str())
                .collect();
            assert_eq!(seq, ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        }
    }
}
