//! Shared helper functions for CLI commands

use std::path::PathBuf;

use clap::ValueEnum;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Store};

/// Resolve the database path: --db flag, then config/environment, then
/// ./inventory.db
pub fn resolve_db_path(global: &GlobalOpts) -> PathBuf {
    global.db.clone().unwrap_or_else(|| Config::load().database())
}

/// Open the store for a command invocation
pub fn open_store(global: &GlobalOpts) -> Result<Store> {
    let path = resolve_db_path(global);
    Store::open(&path).map_err(|e| miette::miette!("{}", e))
}

/// Effective output format: the flag, then the configured default
///
/// `Auto` is left for the command itself to interpret (table for lists,
/// styled lines for single records).
pub fn effective_format(global: &GlobalOpts) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    Config::load()
        .default_format
        .and_then(|s| OutputFormat::from_str(&s, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Ask before a destructive operation unless --yes was passed
pub fn confirm_removal(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
