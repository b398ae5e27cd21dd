//! The `test` use case: load configurations and aggregate verdicts.

use anyhow::Context;
use confgate_domain::{CheckMode, Engine, PolicySource, QueryEvaluator};
use confgate_settings::{Overrides, ResolvedConfig, RunConfigV1};
use confgate_types::CheckResult;
use std::io::Read;
use tracing::info;

/// Input for the test use case.
pub struct TestInput<'a, R> {
    /// Files, directories, or `-` for standard input.
    pub files: &'a [String],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Loaded policy modules.
    pub policy: &'a dyn PolicySource,
    /// Rule interpreter.
    pub evaluator: &'a dyn QueryEvaluator,
    /// Environment variables exposed to rules.
    pub env: Vec<(String, String)>,
    /// Tool version and commit exposed to rules.
    pub version: &'a str,
    pub commit: Option<&'a str>,
    /// Source of `-`.
    pub stdin: R,
}

/// Output from the test use case.
#[derive(Clone, Debug)]
pub struct TestOutput {
    /// One result per configuration unit and namespace, in evaluation order.
    pub results: Vec<CheckResult>,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the test use case: resolve config, load configurations, evaluate every
/// selected namespace.
///
/// Any error aborts the whole run; no partial results are returned.
pub fn run_test<R: Read>(input: TestInput<'_, R>) -> anyhow::Result<TestOutput> {
    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        RunConfigV1::default()
    } else {
        confgate_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        confgate_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    let configurations = confgate_inputs::load_configurations(
        input.files,
        resolved.ignore.as_ref(),
        resolved.input,
        input.stdin,
    )
    .context("load configurations")?;

    let context = confgate_settings::eval_context(input.env, input.version, input.commit);
    let engine = Engine::new(input.evaluator, input.policy, &context).with_tracing(resolved.trace);

    info!(
        files = configurations.len(),
        mode = ?resolved.mode,
        trace = resolved.trace,
        "running policies"
    );
    let operation = match resolved.mode {
        CheckMode::Independent => "check",
        CheckMode::Combined => "check combined",
    };
    let results = engine
        .run(&configurations, &resolved.namespaces, resolved.mode)
        .context(operation)?;

    Ok(TestOutput {
        results,
        resolved_config: resolved,
    })
}

/// Map results to a process exit code: 1 when anything failed (or warned, with
/// `fail_on_warn`), else 0.
pub fn results_exit_code(results: &[CheckResult], fail_on_warn: bool) -> i32 {
    let failed = results
        .iter()
        .any(|r| !r.failures.is_empty() || (fail_on_warn && !r.warnings.is_empty()));
    if failed { 1 } else { 0 }
}
