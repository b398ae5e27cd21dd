use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use confgate_domain::InputFormat;
use confgate_types::ids::STDIN_FILENAME;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// Expand a list of files and directories into configuration sources.
///
/// Behavior:
/// - `-` stands for standard input and is kept as is; empty entries are skipped.
/// - Files are kept as given, whatever their extension.
/// - Directories are walked recursively in name order, keeping files with a
///   supported extension whose path does not match `ignore`.
/// - Every source appears once, at its first position; standard input can only
///   be read once.
pub fn discover_files(files: &[String], ignore: Option<&Regex>) -> anyhow::Result<Vec<String>> {
    let mut found = Vec::new();

    for file in files {
        if file.is_empty() {
            continue;
        }
        if file == STDIN_FILENAME {
            found.push(file.clone());
            continue;
        }

        let meta = std::fs::metadata(file).with_context(|| format!("get file info: {file}"))?;
        if meta.is_dir() {
            let walked =
                walk_directory(Utf8Path::new(file), ignore).context("get files from directory")?;
            found.extend(walked);
        } else {
            found.push(file.clone());
        }
    }

    let mut seen = BTreeSet::new();
    let out: Vec<String> = found
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect();

    if out.is_empty() {
        anyhow::bail!("no files found");
    }

    Ok(out)
}

fn walk_directory(directory: &Utf8Path, ignore: Option<&Regex>) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.context("walk path")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };

        if ignore.is_some_and(|re| re.is_match(path.as_str())) {
            debug!(path = path.as_str(), "ignored");
            continue;
        }

        let format = path.extension().and_then(InputFormat::from_extension);
        if format.is_some() {
            debug!(path = path.as_str(), "discovered configuration");
            out.push(path.into_string());
        }
    }

    Ok(out)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
