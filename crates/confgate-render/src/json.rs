use crate::Reporter;
use confgate_types::{CheckResult, QueryResult, RuleResult};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonEntry {
    filename: String,
    successes: usize,
    warnings: Vec<RuleResult>,
    failures: Vec<RuleResult>,
    exceptions: Vec<RuleResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    queries: Option<Vec<QueryResult>>,
}

/// Buffers every result and writes one tab-indented JSON array on finalize.
pub struct JsonReporter<W: Write> {
    out: W,
    tracing: bool,
    entries: Vec<JsonEntry>,
    finalized: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tracing: false,
            entries: Vec::new(),
            finalized: false,
        }
    }

    /// Include every executed query, with its traces, in each entry.
    pub fn with_tracing(mut self, tracing: bool) -> Self {
        self.tracing = tracing;
        self
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn accumulate(&mut self, result: &CheckResult) -> io::Result<()> {
        // Standard input has no file name.
        let filename = if result.is_stdin() {
            String::new()
        } else {
            result.filename.clone()
        };

        self.entries.push(JsonEntry {
            filename,
            successes: result.successes,
            warnings: result.warnings.clone(),
            failures: result.failures.clone(),
            exceptions: result.exceptions.clone(),
            queries: self.tracing.then(|| result.queries.clone()),
        });
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut ser)?;
        buf.push(b'\n');

        self.out.write_all(&buf)?;
        self.out.flush()
    }
}
