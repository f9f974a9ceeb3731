pub mod config;
pub mod file;

use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Structured input from `--input <file>` or piped stdin, whichever is present.
///
/// `Ok(None)` means neither was supplied and the caller should fall back to
/// its individual flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match piped_stdin()? {
        Some(text) => parse_piped(&text),
        None => Ok(None),
    }
}

/// Unwrap a flag that must be present when no structured input was given.
pub fn required<T>(value: Option<T>, flag: &str) -> Result<T, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("--{} is required (or provide --input)", flag).into())
}

/// Everything piped on stdin; `None` for an interactive terminal.
fn piped_stdin() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(Some(text))
}

/// Blank input counts as absent so `echo | mcalc ...` still uses the flags.
fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| format!("stdin is not valid JSON input: {}", e).into())
}
