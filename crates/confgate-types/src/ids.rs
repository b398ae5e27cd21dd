//! Stable identifiers shared across the workspace.

/// File name used for configuration read from standard input.
pub const STDIN_FILENAME: &str = "-";

/// File name of the synthetic document evaluated in combined mode.
pub const COMBINED_FILENAME: &str = "Combined";

/// Prefix of every package path; stripped once to obtain a namespace.
pub const DATA_PREFIX: &str = "data.";

/// Rule holding the exception names of a namespace.
pub const EXCEPTION_RULE: &str = "exception";

/// Rule name prefixes removed before an exception lookup.
pub const FAILURE_PREFIXES: [&str; 2] = ["deny_", "violation_"];

/// Key carrying the message of an object emission.
pub const MESSAGE_KEY: &str = "msg";
