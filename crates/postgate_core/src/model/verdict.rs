//! Relevance gate verdict.

use serde::{Deserialize, Serialize};

/// Outcome of one relevance gate evaluation. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Text matches its declared topic, or the classifier failed under the
    /// fail-open policy.
    Accept,
    /// Classifier answered with a known negative form.
    Reject,
    /// No usable decision; only produced by the fail-closed policy.
    Undetermined,
}

impl Verdict {
    /// Only `Accept` lets the submission be persisted.
    pub fn permits_publication(self) -> bool {
        matches!(self, Self::Accept)
    }

    /// Stable lowercase id used in log records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Undetermined => "undetermined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Verdict;

    #[test]
    fn only_accept_permits_publication() {
        assert!(Verdict::Accept.permits_publication());
        assert!(!Verdict::Reject.permits_publication());
        assert!(!Verdict::Undetermined.permits_publication());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Verdict::Undetermined).expect("serialize verdict");
        assert_eq!(json, "\"undetermined\"");
    }
}
