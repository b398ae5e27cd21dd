//! Render use case: feed results to the reporter of the chosen format.

use anyhow::Context;
use confgate_render::{OutputFormat, reporter_for};
use confgate_types::CheckResult;
use std::io::Write;

/// Write `results` in `format`. Output is produced only once every result
/// has been accumulated.
pub fn render_results<W: Write>(
    results: &[CheckResult],
    format: OutputFormat,
    tracing: bool,
    out: W,
) -> anyhow::Result<()> {
    let mut reporter = reporter_for(format, out, tracing);
    for result in results {
        reporter
            .accumulate(result)
            .with_context(|| format!("output results: {}", result.filename))?;
    }
    reporter.finalize().context("finalize output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use confgate_types::RuleResult;

    fn sample() -> Vec<CheckResult> {
        let mut result = CheckResult::new("service.yaml", "main");
        result.failures.push(RuleResult::with_message("first failure"));
        vec![result]
    }

    #[test]
    fn renders_tap() {
        let mut buf = Vec::new();
        render_results(&sample(), OutputFormat::Tap, false, &mut buf).expect("render");

        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "1..1\nnot ok 1 - service.yaml - main - first failure\n"
        );
    }

    #[test]
    fn renders_json() {
        let mut buf = Vec::new();
        render_results(&sample(), OutputFormat::Json, false, &mut buf).expect("render");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value[0]["failures"][0]["msg"], "first failure");
    }

    #[test]
    fn empty_table_writes_nothing() {
        let mut buf = Vec::new();
        render_results(&[], OutputFormat::Table, false, &mut buf).expect("render");
        assert!(buf.is_empty());
    }
}
