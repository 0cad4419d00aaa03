//! Rendering of hash results

use crate::hasher::HashedInput;
use anyhow::Result;
use colored::*;
use rhash_core::PrintFlags;
use serde_json::{Map, Value, json};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Formats the digests of one input
pub trait OutputFormatter {
    fn format(&self, result: &HashedInput) -> Result<String>;
}

/// `<ALG>: <digest>  <name>` lines, one per algorithm
pub struct TextFormatter {
    flags: PrintFlags,
    use_color: bool,
}

impl TextFormatter {
    pub fn new(flags: PrintFlags, use_color: bool) -> Self {
        Self { flags, use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &HashedInput) -> Result<String> {
        let name = result.input.to_string();
        let lines: Vec<String> = result
            .digests
            .iter()
            .map(|digest| {
                let label = self.colorize(&digest.algorithm().to_string(), |s| s.yellow());
                let text = self.colorize(&digest.to_text(self.flags), |s| s.cyan());
                format!("{label}: {text}  {name}")
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// One compact JSON object per input
pub struct JsonFormatter {
    flags: PrintFlags,
}

impl JsonFormatter {
    pub fn new(flags: PrintFlags) -> Self {
        Self { flags }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &HashedInput) -> Result<String> {
        let hashes: Map<String, Value> = result
            .digests
            .iter()
            .map(|digest| {
                (
                    digest.algorithm().to_string(),
                    Value::String(digest.to_text(self.flags)),
                )
            })
            .collect();
        let record = json!({
            "file": result.input.to_string(),
            "size": result.size,
            "hashes": hashes,
        });
        Ok(serde_json::to_string(&record)?)
    }
}

pub fn create_formatter(
    format: OutputFormat,
    flags: PrintFlags,
    use_color: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(flags, use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(flags)),
    }
}

/// Print an error to stderr with a red `error:` prefix
pub fn print_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", "error:".red().bold());
}
