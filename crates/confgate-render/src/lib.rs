//! Reporters turning check results into table, JSON, and TAP output.

#![forbid(unsafe_code)]

mod json;
mod reporter;
mod table;
mod tap;

pub use json::JsonReporter;
pub use reporter::{OutputFormat, Reporter, reporter_for};
pub use table::TableReporter;
pub use tap::TapReporter;
