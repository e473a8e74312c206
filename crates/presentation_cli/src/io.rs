//! Input and output helpers for CLI commands

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;
use serde::Serialize;

/// Read text from `path`, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        },
    }
}

/// Pretty JSON rendering of `value`
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Write `value` as pretty JSON to `path`, or to stdout when no path is given
#[allow(clippy::print_stdout)]
pub fn write_output<T: Serialize>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    let json = to_json(value)?;
    match path {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Output written");
        },
        None => println!("{json}"),
    }
    Ok(())
}
