//! Use case orchestration for confgate.
//!
//! This crate provides the application layer: use cases that coordinate the settings,
//! inputs, domain, and render layers. A front end only handles argument parsing and
//! supplies the rule interpreter and the loaded policies.

#![forbid(unsafe_code)]

mod check;
mod render;

pub use check::{TestInput, TestOutput, results_exit_code, run_test};
pub use render::render_results;
