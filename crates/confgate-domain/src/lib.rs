//! Pure verdict aggregation (no IO).
//!
//! Input: loaded policies, parsed configurations, and a capability that runs one query.
//! Output: one `CheckResult` per configuration unit and namespace.

#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod model;
pub mod policy;
pub mod rules;

mod coordinator;
mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::Engine;
pub use error::{CheckError, EvaluationError};
pub use evaluator::{EvalContext, QueryEvaluator, QueryOutput};
pub use model::{CheckMode, ConfigDocument, Configurations, InputFormat, NamespaceSelection};
pub use policy::{PolicyModule, PolicySet, PolicySource};
pub use rules::{RuleKind, classify};
