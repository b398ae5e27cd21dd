//! Evaluate structured configuration files against policy rules and report
//! the verdicts.
//!
//! The rule interpreter is not part of this crate: callers implement
//! [`QueryEvaluator`] over it and hand loaded modules in as a [`PolicySource`].

#![forbid(unsafe_code)]

pub use confgate_app::{TestInput, TestOutput, render_results, results_exit_code, run_test};
pub use confgate_domain::{
    CheckError, CheckMode, ConfigDocument, Configurations, Engine, EvalContext, EvaluationError,
    InputFormat, NamespaceSelection, PolicyModule, PolicySet, PolicySource, QueryEvaluator,
    QueryOutput, RuleKind, classify,
};
pub use confgate_render::{OutputFormat, Reporter};
pub use confgate_types::{CheckResult, QueryResult, RuleResult};
