use crate::core::{FunnelMetrics, Scenario};
use crate::formatting::FormattingConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use super::writers::{HtmlWriter, JsonWriter, MarkdownWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
    Html,
}

impl OutputFormat {
    /// Format implied by a file extension, if any.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            "txt" => Some(Self::Terminal),
            _ => None,
        }
    }
}

/// Text that frames a report but does not depend on the numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    pub tagline: String,
    pub generated_on: NaiveDate,
}

pub const DEFAULT_TITLE: &str = "Recovery ROI Report";
pub const DEFAULT_TAGLINE: &str =
    "These are YOUR numbers. Your close rate. Your gross. Your opportunity.";

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            generated_on: chrono::Local::now().date_naive(),
        }
    }
}

pub trait ReportWriter {
    fn write_report(&mut self, scenario: &Scenario, metrics: &FunnelMetrics)
        -> anyhow::Result<()>;
}

/// Build the writer for `format` over any byte sink.
pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    options: ReportOptions,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, options, formatting)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer, options)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Html => Box::new(HtmlWriter::new(writer, options)),
    }
}

/// Render a full report into a string.
pub fn render_report(
    format: OutputFormat,
    scenario: &Scenario,
    metrics: &FunnelMetrics,
    options: ReportOptions,
    formatting: FormattingConfig,
) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = create_writer(format, Box::new(&mut buffer), options, formatting);
        writer.write_report(scenario, metrics)?;
    }
    Ok(String::from_utf8(buffer)?)
}
