use crate::Reporter;
use confgate_types::CheckResult;
use std::io::{self, Write};

/// Test Anything Protocol output: one plan and one numbered line per
/// finding for every file that has findings.
pub struct TapReporter<W: Write> {
    out: W,
    tracing: bool,
    buf: String,
    finalized: bool,
}

impl<W: Write> TapReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tracing: false,
            buf: String::new(),
            finalized: false,
        }
    }

    /// Report every query with its trace lines instead of findings.
    pub fn with_tracing(mut self, tracing: bool) -> Self {
        self.tracing = tracing;
        self
    }

    fn push_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    fn push_traces(&mut self, result: &CheckResult) {
        self.push_line(&format!("# {}", result.filename));
        for query in &result.queries {
            let status = if query.passed() { "ok" } else { "not ok" };
            self.push_line(&format!("{} {}", status, query.query));
            for (index, trace) in query.traces.iter().enumerate() {
                self.push_line(&format!("# {} {}", index, trace));
            }
        }
    }

    fn push_findings(&mut self, result: &CheckResult) {
        let total = result.failures.len() + result.warnings.len() + result.successes;
        if total == 0 {
            return;
        }

        // Standard input has no path; its locator collapses to the separator.
        let locator = if result.is_stdin() {
            "- ".to_string()
        } else {
            format!("{} - ", result.filename)
        };
        let namespace = result.namespace.as_str();
        let line = |status: &str, counter: usize, message: &str| {
            format!("{status} {counter} - {locator}{namespace} - {message}")
        };

        self.push_line(&format!("1..{}", total));
        let mut counter = 0;

        let mut lines = Vec::with_capacity(total + 2);
        for failure in &result.failures {
            counter += 1;
            lines.push(line("not ok", counter, &failure.message));
        }

        if !result.warnings.is_empty() {
            lines.push("# warnings".to_string());
            for warning in &result.warnings {
                counter += 1;
                lines.push(line("not ok", counter, &warning.message));
            }
        }

        if result.successes > 0 {
            lines.push("# successes".to_string());
            for _ in 0..result.successes {
                counter += 1;
                lines.push(line("ok", counter, ""));
            }
        }

        for l in lines {
            self.push_line(&l);
        }
    }
}

impl<W: Write> Reporter for TapReporter<W> {
    fn accumulate(&mut self, result: &CheckResult) -> io::Result<()> {
        if self.tracing {
            self.push_traces(result);
        } else {
            self.push_findings(result);
        }
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        self.out.write_all(self.buf.as_bytes())?;
        self.out.flush()
    }
}
