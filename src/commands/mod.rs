//! CLI command implementations.
//!
//! Available commands:
//! - **calculate**: compute metrics from flags and/or a scenario file
//! - **wizard**: collect inputs interactively, then report
//! - **report**: render a printable report for a saved scenario
//! - **init**: write a starter `.funnel-roi.toml`

pub mod calculate;
pub mod init;
pub mod report;
pub mod wizard;

pub use calculate::{build_scenario, handle_calculate, CalculateConfig};
pub use init::{init_config, init_config_at};
pub use report::{generate_report, ReportConfig};
pub use wizard::{run_wizard, WizardConfig};

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::config::FunnelConfig;
use crate::core::Scenario;
use crate::formatting::FormattingConfig;
use crate::io::{self, create_writer, render_report, OutputFormat, ReportOptions};
use crate::metrics::compute_metrics;

/// Explicit flag first, then the output file's extension, then config.
pub fn pick_format(
    explicit: Option<OutputFormat>,
    output: Option<&Path>,
    config: &FunnelConfig,
) -> OutputFormat {
    explicit
        .or_else(|| output.and_then(OutputFormat::from_extension))
        .unwrap_or_else(|| config.default_format())
}

/// Render `scenario` to a file, or to stdout when no file is given.
pub fn emit_report(
    format: OutputFormat,
    scenario: &Scenario,
    options: ReportOptions,
    formatting: FormattingConfig,
    output: Option<&Path>,
) -> Result<()> {
    let metrics = compute_metrics(&scenario.inputs);

    match output {
        Some(path) => {
            // Files never get terminal escape codes.
            let text = render_report(
                format,
                scenario,
                &metrics,
                options,
                FormattingConfig::plain(),
            )?;
            io::write_file(path, &text)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("Wrote {:?} report to {}", format, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = create_writer(format, Box::new(stdout.lock()), options, formatting);
            writer.write_report(scenario, &metrics)?;
            std::io::stdout().flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use std::path::PathBuf;

    #[test]
    fn test_pick_format_precedence() {
        let config = FunnelConfig {
            output: Some(OutputConfig {
                default_format: Some(OutputFormat::Markdown),
                use_color: None,
            }),
            ..Default::default()
        };
        let html = PathBuf::from("report.html");

        assert_eq!(
            pick_format(Some(OutputFormat::Json), Some(html.as_path()), &config),
            OutputFormat::Json
        );
        assert_eq!(pick_format(None, Some(html.as_path()), &config), OutputFormat::Html);
        assert_eq!(pick_format(None, None, &config), OutputFormat::Markdown);
        assert_eq!(
            pick_format(None, None, &FunnelConfig::default()),
            OutputFormat::Terminal
        );
    }
}
