//! Output formatting for different formats.

use std::fmt;

use clap::ValueEnum;
use colored::Colorize;
use serde::Deserialize;
use serde_json::{Map, Value};
use spahau_core::selftest::render;
use spahau_core::{Response, ResponseSet};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable sentences
    #[default]
    Pretty,
    /// One JSON object keyed by address, printed at the end
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print a warning to stderr; processing continues.
pub fn warn(message: impl fmt::Display) {
    eprintln!("spahau: {} {message}", "warning:".yellow().bold());
}

/// The sentence reporting a lookup result.
#[must_use]
pub fn lookup_sentence(address: &str, set: &ResponseSet) -> String {
    if set.is_empty() {
        return format!("The IP address: {address} is NOT found in the Spamhaus blacklists.");
    }
    if let Some(code) = set.error() {
        return format!(
            "Spamhaus returned an error code for {address}: {}",
            Response::new(code)
        );
    }
    format!(
        "The IP address: {address} is found in the following Spamhaus public IP zone: {}",
        render(set)
    )
}

/// Self-test progress line: `expecting 3 responses: '...' ...`.
#[must_use]
pub fn count_line(prefix: &str, set: &ResponseSet) -> String {
    if set.is_empty() {
        format!("{prefix} 0 responses")
    } else {
        format!("{prefix} {} responses: {}", set.len(), render(set))
    }
}

/// Emits per-address results in the selected format.
///
/// Pretty output is written immediately; JSON output is collected and
/// written by [`Printer::finish`].
#[derive(Debug)]
pub struct Printer {
    format: OutputFormat,
    json: Map<String, Value>,
}

impl Printer {
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            json: Map::new(),
        }
    }

    /// True when human-readable progress may be printed.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.format == OutputFormat::Pretty
    }

    /// A lookup finished.
    pub fn lookup(&mut self, address: &str, set: &ResponseSet) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => println!("{}", lookup_sentence(address, set)),
            OutputFormat::Json => {
                let responses: Vec<Response> = set.iter().copied().map(Response::new).collect();
                self.json
                    .insert(address.to_string(), serde_json::to_value(responses)?);
            }
        }
        Ok(())
    }

    /// A lookup failed; a warning has already been printed.
    pub fn failed(&mut self, address: &str) {
        if self.format == OutputFormat::Json {
            self.json.insert(address.to_string(), Value::Null);
        }
    }

    /// A query hostname was built.
    pub fn hostname(&mut self, address: &str, hostname: &str) {
        match self.format {
            OutputFormat::Pretty => println!("{hostname}"),
            OutputFormat::Json => {
                self.json
                    .insert(address.to_string(), Value::String(hostname.to_string()));
            }
        }
    }

    /// A response code was described.
    pub fn describe(&mut self, address: &str, response: &Response) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => println!("{response}"),
            OutputFormat::Json => {
                self.json
                    .insert(address.to_string(), serde_json::to_value(response)?);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub const fn collected(&self) -> &Map<String, Value> {
        &self.json
    }

    /// Flush collected JSON output.
    pub fn finish(self) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        }
        Ok(())
    }
}
