//! Output formatting

use crate::error::CliResult;
use clap::ValueEnum;
use console::{style, Term};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Result of a command, renderable as text or JSON
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Text rendering
    pub text: String,
    /// JSON rendering
    pub json: Value,
    /// Validity verdict for `validate`/`bounds`; `None` for calculations
    pub verdict: Option<bool>,
}

impl Report {
    /// A calculation result
    #[must_use]
    pub fn new(text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json,
            verdict: None,
        }
    }

    /// A validity check result
    #[must_use]
    pub fn verdict(valid: bool, text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json,
            verdict: Some(valid),
        }
    }

    /// False only for a failed validity check
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.verdict.unwrap_or(true)
    }

    /// Render in `format`
    pub fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.json)?),
            OutputFormat::Text => Ok(match self.verdict {
                Some(true) => format!("{} {}", style("VALID").green().bold(), self.text),
                Some(false) => format!("{} {}", style("INVALID").red().bold(), self.text),
                None => self.text.clone(),
            }),
        }
    }

    /// Render to stdout
    pub fn print(&self, format: OutputFormat) -> CliResult<()> {
        Term::stdout().write_line(&self.render(format)?)?;
        Ok(())
    }
}
