use crate::error::CheckError;
use crate::evaluator::{EvalContext, QueryEvaluator};
use crate::policy::PolicySource;
use crate::rules::{self, RuleKind, classify};
use confgate_types::ids::MESSAGE_KEY;
use confgate_types::{CheckResult, QueryResult, RuleResult};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::debug;

/// Evaluates loaded policies against documents through a query evaluator.
///
/// Holds only borrowed, read-only collaborators: every call produces fresh
/// results and nothing is retained between calls.
pub struct Engine<'a> {
    evaluator: &'a dyn QueryEvaluator,
    policy: &'a dyn PolicySource,
    context: &'a EvalContext,
    trace: bool,
}

impl<'a> Engine<'a> {
    pub fn new(
        evaluator: &'a dyn QueryEvaluator,
        policy: &'a dyn PolicySource,
        context: &'a EvalContext,
    ) -> Self {
        Self {
            evaluator,
            policy,
            context,
            trace: false,
        }
    }

    /// Ask the evaluator for trace lines on every query.
    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub(crate) fn policy(&self) -> &dyn PolicySource {
        self.policy
    }

    /// Evaluate every failure and warning rule of `namespace` against one document.
    pub fn check_document(
        &self,
        filename: &str,
        document: &JsonValue,
        namespace: &str,
    ) -> Result<CheckResult, CheckError> {
        let counts = self.policy.rule_counts(namespace);
        self.aggregate(filename, document, namespace, &counts)
    }

    /// Classify the outcomes of the given rules, `counts` holding the number of
    /// clauses declared under each rule name.
    pub fn aggregate(
        &self,
        filename: &str,
        document: &JsonValue,
        namespace: &str,
        counts: &BTreeMap<String, usize>,
    ) -> Result<CheckResult, CheckError> {
        let mut check = CheckResult::new(filename, namespace);

        for (rule, &count) in counts {
            let kind = classify(rule);
            if !kind.is_reported() || count == 0 {
                continue;
            }

            let exception_query = rules::exception_query(namespace, rule);
            let exception_result = self.query(document, &exception_query, "query exception")?;

            // Exception matches carry no message of their own.
            let exceptions: Vec<RuleResult> = exception_result
                .results
                .iter()
                .filter(|r| r.is_pass())
                .map(|r| RuleResult {
                    message: exception_query.clone(),
                    metadata: r.metadata.clone(),
                })
                .collect();

            let rule_query = rules::rule_query(namespace, rule);
            let rule_result = self.query(document, &rule_query, "query rule")?;

            let mut successes = 0;
            let mut failures = Vec::new();
            let mut warnings = Vec::new();
            for result in &rule_result.results {
                if result.is_pass() {
                    successes += 1;
                    continue;
                }
                if !exceptions.is_empty() {
                    continue;
                }
                match kind {
                    RuleKind::Failure => failures.push(result.clone()),
                    _ => warnings.push(result.clone()),
                }
            }

            // The evaluator reports one outcome per rule name, so clauses that
            // passed silently alongside a sibling are topped up here.
            let accounted = successes + failures.len() + warnings.len() + exceptions.len();
            if accounted < count {
                debug!(
                    namespace,
                    rule = rule.as_str(),
                    count,
                    accounted,
                    "reconciling clause count"
                );
                successes += count - accounted;
            }

            check.successes += successes;
            check.failures.extend(failures);
            check.warnings.extend(warnings);
            check.exceptions.extend(exceptions);
            check.queries.push(exception_result);
            check.queries.push(rule_result);
        }

        Ok(check)
    }

    /// Run one query; has no notion of passing or failing rules.
    fn query(
        &self,
        document: &JsonValue,
        query: &str,
        operation: &'static str,
    ) -> Result<QueryResult, CheckError> {
        debug!(query, trace = self.trace, "evaluating query");

        let output = self
            .evaluator
            .evaluate(self.context, document, query, self.trace)
            .map_err(|source| CheckError::Evaluation {
                operation,
                query: query.to_string(),
                source,
            })?;

        let results = decode_expressions(query, output.expressions)?;
        let traces = output
            .traces
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();

        Ok(QueryResult {
            query: query.to_string(),
            results,
            traces,
        })
    }
}

/// Turn raw expression values into results.
///
/// An expression that is not a non-empty array emitted nothing and counts as a
/// bare pass. Array elements are strings (`deny[msg]`) or objects carrying a
/// `msg` key (`deny[{"msg": msg}]`); other element kinds are skipped.
fn decode_expressions(
    query: &str,
    expressions: Vec<JsonValue>,
) -> Result<Vec<RuleResult>, CheckError> {
    let mut results = Vec::new();
    for expression in expressions {
        let values = match expression {
            JsonValue::Array(values) if !values.is_empty() => values,
            _ => {
                results.push(RuleResult::pass());
                continue;
            }
        };

        for value in values {
            match value {
                JsonValue::String(message) => results.push(RuleResult::with_message(message)),
                JsonValue::Object(fields) => results.push(result_from_fields(query, fields)?),
                _ => {}
            }
        }
    }
    Ok(results)
}

fn result_from_fields(
    query: &str,
    mut fields: Map<String, JsonValue>,
) -> Result<RuleResult, CheckError> {
    let message = match fields.remove(MESSAGE_KEY) {
        Some(JsonValue::String(message)) => message,
        Some(other) => {
            return Err(CheckError::MalformedResult {
                query: query.to_string(),
                reason: format!("{MESSAGE_KEY} field must be a string, got {other}"),
            });
        }
        None => {
            return Err(CheckError::MalformedResult {
                query: query.to_string(),
                reason: format!("rule missing {MESSAGE_KEY} field"),
            });
        }
    };

    Ok(RuleResult {
        message,
        metadata: fields,
    })
}
