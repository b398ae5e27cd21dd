use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `confgate.toml` schema v1.
///
/// Every key is optional; unset keys fall back to overrides and then to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunConfigV1 {
    /// Namespaces to evaluate, in order. Defaults to `["main"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,

    /// Evaluate every namespace declared by the loaded policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_namespaces: Option<bool>,

    /// Merge all inputs into one document keyed by path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<bool>,

    /// Report format: `table` (default), `json`, or `tap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Treat warnings as failing the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_warn: Option<bool>,

    /// Regex of walked paths to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,

    /// Force one decoder (`json`, `yaml`, `toml`) instead of going by extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}
