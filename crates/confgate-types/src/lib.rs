//! Stable DTOs and IDs used across the confgate workspace.
//!
//! This crate is intentionally boring:
//! - the result tree produced by evaluation (file -> queries -> results)
//! - stable string IDs shared by the evaluator, coordinator and reporters

#![forbid(unsafe_code)]

pub mod ids;
pub mod result;

pub use result::{CheckResult, QueryResult, RuleResult};
