use crate::error::EvaluationError;
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;

/// Ambient data handed to every query of a run.
///
/// Assembled once by the caller; evaluators expose it to rules as runtime data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalContext {
    pub env: BTreeMap<String, String>,
    pub version: String,
    pub commit: Option<String>,
}

impl EvalContext {
    pub fn to_value(&self) -> JsonValue {
        json!({
            "env": self.env,
            "version": self.version,
            "commit": self.commit.as_deref().unwrap_or_default(),
        })
    }
}

/// Raw output of one query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOutput {
    /// One value per expression the query produced, in evaluation order.
    ///
    /// A non-empty array holds the rule's emissions: strings or objects with a `msg` key.
    /// Anything else means the expression emitted nothing.
    pub expressions: Vec<JsonValue>,

    /// Human readable trace lines; only expected when tracing was requested.
    pub traces: Vec<String>,
}

impl QueryOutput {
    pub fn new(expressions: Vec<JsonValue>) -> Self {
        Self {
            expressions,
            traces: Vec::new(),
        }
    }
}

/// Runs one query of the rule language against one document.
///
/// Implementations wrap the actual rule interpreter. A failure is fatal to the
/// run and is never retried.
pub trait QueryEvaluator {
    fn evaluate(
        &self,
        context: &EvalContext,
        document: &JsonValue,
        query: &str,
        trace: bool,
    ) -> Result<QueryOutput, EvaluationError>;
}

impl<T: QueryEvaluator + ?Sized> QueryEvaluator for &T {
    fn evaluate(
        &self,
        context: &EvalContext,
        document: &JsonValue,
        query: &str,
        trace: bool,
    ) -> Result<QueryOutput, EvaluationError> {
        (**self).evaluate(context, document, query, trace)
    }
}
