use crate::error::EvaluationError;
use crate::evaluator::{EvalContext, QueryEvaluator, QueryOutput};
use crate::policy::{PolicyModule, PolicySet};
use serde_json::{Value as JsonValue, json};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Evaluator double answering queries from a fixed script.
///
/// Unscripted queries produce no expressions at all.
#[derive(Default)]
pub struct ScriptedEvaluator {
    responses: BTreeMap<String, Vec<JsonValue>>,
    failing: Option<String>,
    traces: Vec<String>,
    calls: RefCell<Vec<String>>,
    trace_requested: Cell<bool>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, expressions: Vec<JsonValue>) -> Self {
        self.responses.insert(query.to_string(), expressions);
        self
    }

    pub fn fail_on(mut self, query: &str) -> Self {
        self.failing = Some(query.to_string());
        self
    }

    pub fn with_traces(mut self, lines: &[&str]) -> Self {
        self.traces = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn saw_trace_requests(&self) -> bool {
        self.trace_requested.get()
    }
}

impl QueryEvaluator for ScriptedEvaluator {
    fn evaluate(
        &self,
        _context: &EvalContext,
        _document: &JsonValue,
        query: &str,
        trace: bool,
    ) -> Result<QueryOutput, EvaluationError> {
        self.calls.borrow_mut().push(query.to_string());
        if trace {
            self.trace_requested.set(true);
        }
        if self.failing.as_deref() == Some(query) {
            return Err(EvaluationError::new(format!("scripted failure for {query}")));
        }

        Ok(QueryOutput {
            expressions: self.responses.get(query).cloned().unwrap_or_default(),
            traces: if trace {
                self.traces.clone()
            } else {
                Vec::new()
            },
        })
    }
}

/// Evaluator double computing each answer from the document and query.
pub struct FnEvaluator<F>(F);

impl<F> FnEvaluator<F>
where
    F: Fn(&JsonValue, &str) -> Result<QueryOutput, EvaluationError>,
{
    pub fn new(answer: F) -> Self {
        Self(answer)
    }
}

impl<F> QueryEvaluator for FnEvaluator<F>
where
    F: Fn(&JsonValue, &str) -> Result<QueryOutput, EvaluationError>,
{
    fn evaluate(
        &self,
        _context: &EvalContext,
        document: &JsonValue,
        query: &str,
        _trace: bool,
    ) -> Result<QueryOutput, EvaluationError> {
        (self.0)(document, query)
    }
}

/// Expression of a rule that matched nothing.
pub fn silent_pass() -> JsonValue {
    json!([])
}

/// Expression of a rule emitting the given messages.
pub fn messages(messages: &[&str]) -> JsonValue {
    json!(messages)
}

/// Expression of a satisfied exception lookup.
pub fn exception_match() -> JsonValue {
    json!(true)
}

pub fn counts(rules: &[(&str, usize)]) -> BTreeMap<String, usize> {
    rules
        .iter()
        .map(|(name, count)| (name.to_string(), *count))
        .collect()
}

/// Policy set with a single module declaring `rules` in `namespace`.
pub fn policy(namespace: &str, rules: &[&str]) -> PolicySet {
    PolicySet::new(vec![PolicyModule::new(
        format!("policy/{namespace}.rego"),
        format!("data.{namespace}"),
        rules,
    )])
    .expect("valid policy set")
}
