use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A single outcome emitted by a rule.
///
/// An empty message is a bare pass. Metadata is every extra key an object
/// emission carried besides its message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    #[serde(rename = "msg")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, JsonValue>,
}

impl RuleResult {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            metadata: Map::new(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.message.is_empty()
    }
}

/// The outcome of executing one query against one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    pub results: Vec<RuleResult>,
    pub traces: Vec<String>,
}

impl QueryResult {
    /// A query passed when none of its results carries a message.
    pub fn passed(&self) -> bool {
        self.results.iter().all(RuleResult::is_pass)
    }
}

/// Verdicts for one configuration unit within one namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckResult {
    pub filename: String,
    pub namespace: String,
    pub successes: usize,
    pub warnings: Vec<RuleResult>,
    pub failures: Vec<RuleResult>,
    pub exceptions: Vec<RuleResult>,

    /// Every query executed while producing this result, kept for tracing.
    pub queries: Vec<QueryResult>,
}

impl CheckResult {
    pub fn new(filename: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Fold another result for the same file into this one, keeping
    /// evaluation order of every finding list.
    pub fn absorb(&mut self, other: CheckResult) {
        self.successes += other.successes;
        self.warnings.extend(other.warnings);
        self.failures.extend(other.failures);
        self.exceptions.extend(other.exceptions);
        self.queries.extend(other.queries);
    }

    /// Number of rule outcomes accounted for by this result.
    pub fn total(&self) -> usize {
        self.successes + self.warnings.len() + self.failures.len() + self.exceptions.len()
    }

    pub fn is_stdin(&self) -> bool {
        self.filename == crate::ids::STDIN_FILENAME
    }
}
