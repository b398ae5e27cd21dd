use crate::Reporter;
use confgate_types::CheckResult;
use std::io::{self, Write};

const HEADERS: [&str; 3] = ["result", "file", "message"];
const TRACE_HEADERS: [&str; 4] = ["passed", "file", "query", "trace"];

/// Collects one row per finding and renders a bordered grid on finalize.
pub struct TableReporter<W: Write> {
    out: W,
    tracing: bool,
    rows: Vec<Vec<String>>,
    finalized: bool,
}

impl<W: Write> TableReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tracing: false,
            rows: Vec::new(),
            finalized: false,
        }
    }

    /// Render one row per trace line instead of one per finding.
    pub fn with_tracing(mut self, tracing: bool) -> Self {
        self.tracing = tracing;
        self
    }

    fn push(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }
}

impl<W: Write> Reporter for TableReporter<W> {
    fn accumulate(&mut self, result: &CheckResult) -> io::Result<()> {
        let file = result.filename.as_str();

        if self.tracing {
            for query in &result.queries {
                let passed = if query.passed() { "success" } else { "fail" };
                for trace in &query.traces {
                    self.push(&[passed, file, &query.query, trace]);
                }
            }
            return Ok(());
        }

        for _ in 0..result.successes {
            self.push(&["success", file, ""]);
        }
        for warning in &result.warnings {
            self.push(&["warning", file, &warning.message]);
        }
        for failure in &result.failures {
            self.push(&["failure", file, &failure.message]);
        }
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        if self.finalized || self.rows.is_empty() {
            self.finalized = true;
            return Ok(());
        }
        self.finalized = true;

        let headers: &[&str] = if self.tracing {
            &TRACE_HEADERS
        } else {
            &HEADERS
        };
        let grid = render_grid(headers, &self.rows);
        self.out.write_all(grid.as_bytes())?;
        self.out.flush()
    }
}

fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let render_row = |cells: &mut dyn Iterator<Item = String>| {
        let mut line = String::from("|");
        for (width, cell) in widths.iter().zip(cells) {
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(&cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&render_row(&mut headers.iter().map(|h| h.to_uppercase())));
    out.push_str(&border);
    for row in rows {
        out.push_str(&render_row(&mut row.iter().cloned()));
    }
    out.push_str(&border);
    out
}
