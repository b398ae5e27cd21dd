use crate::{JsonReporter, TableReporter, TapReporter};
use confgate_types::CheckResult;
use std::io::{self, Write};

/// Consumer of the result stream of one run.
///
/// `accumulate` is called once per result in evaluation order; `finalize`
/// flushes whatever was buffered and is called at most once, after the run
/// completed successfully.
pub trait Reporter {
    fn accumulate(&mut self, result: &CheckResult) -> io::Result<()>;

    fn finalize(&mut self) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Tap,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "tap" => Some(OutputFormat::Tap),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Tap => "tap",
        }
    }
}

pub fn reporter_for<'w, W: Write + 'w>(
    format: OutputFormat,
    out: W,
    tracing: bool,
) -> Box<dyn Reporter + 'w> {
    match format {
        OutputFormat::Table => Box::new(TableReporter::new(out).with_tracing(tracing)),
        OutputFormat::Json => Box::new(JsonReporter::new(out).with_tracing(tracing)),
        OutputFormat::Tap => Box::new(TapReporter::new(out).with_tracing(tracing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confgate_types::RuleResult;

    #[test]
    fn parses_known_formats_only() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Tap] {
            assert_eq!(OutputFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(OutputFormat::parse("junit"), None);
    }

    #[test]
    fn every_format_reports_through_the_same_contract() {
        let mut result = CheckResult::new("service.yaml", "main");
        result.failures.push(RuleResult::with_message("first failure"));

        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Tap] {
            let mut buf = Vec::new();
            {
                let mut reporter = reporter_for(format, &mut buf, false);
                reporter.accumulate(&result).expect("accumulate");
                reporter.finalize().expect("finalize");
            }
            let out = String::from_utf8(buf).expect("utf8");
            assert!(out.contains("first failure"), "{format:?}: {out}");
        }
    }

    #[test]
    fn nothing_is_written_before_finalize() {
        let mut result = CheckResult::new("service.yaml", "main");
        result.warnings.push(RuleResult::with_message("first warning"));

        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Tap] {
            let mut buf = Vec::new();
            {
                let mut reporter = reporter_for(format, &mut buf, false);
                reporter.accumulate(&result).expect("accumulate");
            }
            assert!(buf.is_empty(), "{format:?} wrote before finalize");
        }
    }
}
