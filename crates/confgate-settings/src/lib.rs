//! Run configuration parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod context;
mod model;
mod resolve;

pub use context::eval_context;
pub use model::RunConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `confgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<RunConfigV1> {
    let cfg: RunConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config of one run (file values, then overrides).
pub fn resolve_config(cfg: RunConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema of `confgate.toml`, for editor tooling.
pub fn config_schema() -> anyhow::Result<serde_json::Value> {
    let schema = schemars::schema_for!(RunConfigV1);
    Ok(serde_json::to_value(schema)?)
}
