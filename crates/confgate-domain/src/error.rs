use thiserror::Error;

/// Failure reported by a query evaluator while executing a single query.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Every way a run can fail. All of them abort the run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A configuration input could not be decoded.
    #[error("parse configuration {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// A rule module is malformed or could not be obtained.
    #[error("load policy {module}: {message}")]
    PolicyLoad { module: String, message: String },

    /// The evaluator failed while running `query` as part of `operation`.
    #[error("{operation}: {query}")]
    Evaluation {
        operation: &'static str,
        query: String,
        #[source]
        source: EvaluationError,
    },

    /// An emission could not be interpreted as a result.
    #[error("new result from {query}: {reason}")]
    MalformedResult { query: String, reason: String },
}

impl CheckError {
    pub fn config_parse(path: impl Into<String>, message: impl ToString) -> Self {
        CheckError::ConfigParse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn policy_load(module: impl Into<String>, message: impl ToString) -> Self {
        CheckError::PolicyLoad {
            module: module.into(),
            message: message.to_string(),
        }
    }
}
