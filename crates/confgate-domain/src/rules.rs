//! Rule name classification.
//!
//! Only rules whose names follow the failure or warning conventions take part
//! in aggregation. Every other rule in a namespace is a helper and is ignored.

use confgate_types::ids::{DATA_PREFIX, EXCEPTION_RULE, FAILURE_PREFIXES};
use regex::Regex;
use std::sync::LazyLock;

static FAILURE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(deny|violation)(_(?-u:\w)+)*$").expect("failure rule pattern"));

static WARNING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^warn(_(?-u:\w)+)*$").expect("warning rule pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Failure,
    Warning,
    Neutral,
}

impl RuleKind {
    /// Whether rules of this kind produce verdicts.
    pub fn is_reported(self) -> bool {
        !matches!(self, RuleKind::Neutral)
    }
}

pub fn classify(name: &str) -> RuleKind {
    if FAILURE_NAME.is_match(name) {
        RuleKind::Failure
    } else if WARNING_NAME.is_match(name) {
        RuleKind::Warning
    } else {
        RuleKind::Neutral
    }
}

/// Name an exception must list to cover `rule`.
///
/// `deny_foo` and `violation_foo` are both covered by an exception for `foo`.
pub fn exception_name(rule: &str) -> &str {
    FAILURE_PREFIXES
        .iter()
        .find_map(|prefix| rule.strip_prefix(prefix))
        .unwrap_or(rule)
}

/// Query matching the exceptions declared for `rule` in `namespace`.
pub fn exception_query(namespace: &str, rule: &str) -> String {
    let name = serde_json::Value::String(exception_name(rule).to_string());
    format!("{DATA_PREFIX}{namespace}.{EXCEPTION_RULE}[_][_] == {name}")
}

/// Query returning everything `rule` emits in `namespace`.
pub fn rule_query(namespace: &str, rule: &str) -> String {
    format!("{DATA_PREFIX}{namespace}.{rule}")
}
