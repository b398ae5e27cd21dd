use crate::model::RunConfigV1;
use anyhow::Context;
use confgate_domain::{CheckMode, InputFormat, NamespaceSelection};
use confgate_render::OutputFormat;
use regex::Regex;

/// Command-line equivalents; set values win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub namespaces: Option<Vec<String>>,
    pub all_namespaces: Option<bool>,
    pub combine: Option<bool>,
    pub trace: Option<bool>,
    pub output: Option<String>,
    pub fail_on_warn: Option<bool>,
    pub ignore: Option<String>,
    pub input: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub namespaces: NamespaceSelection,
    pub mode: CheckMode,
    pub trace: bool,
    pub output: OutputFormat,
    pub fail_on_warn: bool,
    pub ignore: Option<Regex>,
    pub input: Option<InputFormat>,
}

pub fn resolve_config(cfg: RunConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let all_namespaces = overrides
        .all_namespaces
        .or(cfg.all_namespaces)
        .unwrap_or(false);
    let namespaces = if all_namespaces {
        NamespaceSelection::All
    } else {
        match overrides.namespaces.or(cfg.namespaces) {
            Some(list) if !list.is_empty() => NamespaceSelection::Only(list),
            Some(_) => anyhow::bail!("namespaces must not be empty"),
            None => NamespaceSelection::default(),
        }
    };

    let mode = if overrides.combine.or(cfg.combine).unwrap_or(false) {
        CheckMode::Combined
    } else {
        CheckMode::Independent
    };

    let output = match overrides.output.or(cfg.output) {
        Some(name) => parse_output(&name)?,
        None => OutputFormat::default(),
    };

    let ignore = overrides
        .ignore
        .or(cfg.ignore)
        .filter(|pattern| !pattern.is_empty())
        .map(|pattern| {
            Regex::new(&pattern).with_context(|| format!("invalid ignore pattern: {pattern}"))
        })
        .transpose()?;

    let input = overrides
        .input
        .or(cfg.input)
        .map(|name| parse_input(&name))
        .transpose()?;

    Ok(ResolvedConfig {
        namespaces,
        mode,
        trace: overrides.trace.or(cfg.trace).unwrap_or(false),
        output,
        fail_on_warn: overrides.fail_on_warn.or(cfg.fail_on_warn).unwrap_or(false),
        ignore,
        input,
    })
}

fn parse_output(v: &str) -> anyhow::Result<OutputFormat> {
    match OutputFormat::parse(v) {
        Some(format) => Ok(format),
        None => anyhow::bail!("unknown output: {v} (expected table|json|tap)"),
    }
}

fn parse_input(v: &str) -> anyhow::Result<InputFormat> {
    match InputFormat::parse(v) {
        Some(format) => Ok(format),
        None => anyhow::bail!("unknown input: {v} (expected json|yaml|toml)"),
    }
}
