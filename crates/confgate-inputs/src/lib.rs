//! Configuration source adapters: expand the file list, read and decode documents.
//!
//! This crate is allowed to do filesystem IO. Standard input is supplied by the
//! caller as a reader so the crate never touches process handles itself.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use confgate_domain::{CheckError, Configurations, InputFormat};
use confgate_types::ids::STDIN_FILENAME;
use regex::Regex;
use std::io::Read;
use tracing::debug;

pub use discover::discover_files;
pub use parse::parse_document;

/// Expand `files` and decode every resulting source.
///
/// `input` forces one decoder for every source; otherwise the file extension
/// decides and standard input is read as YAML.
pub fn load_configurations<R: Read>(
    files: &[String],
    ignore: Option<&Regex>,
    input: Option<InputFormat>,
    mut stdin: R,
) -> anyhow::Result<Configurations> {
    let paths = discover_files(files, ignore).context("parse files")?;

    let mut configurations = Configurations::new();
    for path in paths {
        let text = if path == STDIN_FILENAME {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("read standard input")?;
            text
        } else {
            std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?
        };

        let format = match input {
            Some(format) => format,
            None => format_for(&path)?,
        };
        debug!(
            path = path.as_str(),
            format = format.as_str(),
            "decoding configuration"
        );

        let document = parse_document(&path, &text, format)?;
        configurations.insert(path, document);
    }

    Ok(configurations)
}

fn format_for(path: &str) -> anyhow::Result<InputFormat> {
    if path == STDIN_FILENAME {
        return Ok(InputFormat::Yaml);
    }

    let extension = Utf8Path::new(path).extension();
    match extension.and_then(InputFormat::from_extension) {
        Some(format) => Ok(format),
        None => Err(CheckError::config_parse(path, "unsupported file type").into()),
    }
}
