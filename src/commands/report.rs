use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::FunnelConfig;
use crate::formatting::FormattingConfig;
use crate::io::{self, OutputFormat};

use super::emit_report;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub scenario: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Render a saved scenario, printable HTML by default.
pub fn generate_report(report: ReportConfig, config: &FunnelConfig) -> Result<()> {
    let scenario = io::load_scenario(&report.scenario)
        .with_context(|| format!("Failed to load scenario {}", report.scenario.display()))?
        .resolve(config.default_inputs());

    log::debug!(
        "Rendering {:?} report for {}",
        report.format,
        report.scenario.display()
    );

    emit_report(
        report.format,
        &scenario,
        config.report_options(),
        FormattingConfig::resolve(false, config.use_color()),
        report.output.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig as ReportSection;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_html_report_uses_config_title_and_contact() {
        let dir = TempDir::new().unwrap();
        let scenario = dir.path().join("lakeside.toml");
        std::fs::write(
            &scenario,
            indoc! {r#"
                [inputs]
                monthly_visitors = 100
                gross_profit_per_deal = 3000
                tool_cost = 1500

                [contact]
                business_name = "Lakeside Auto"
                email = "gm@lakeside.example"
            "#},
        )
        .unwrap();
        let output = dir.path().join("lakeside.html");

        let config = FunnelConfig {
            report: Some(ReportSection {
                title: Some("Lakeside Recovery Plan".to_string()),
                tagline: None,
            }),
            ..Default::default()
        };
        generate_report(
            ReportConfig {
                scenario,
                format: OutputFormat::Html,
                output: Some(output.clone()),
            },
            &config,
        )
        .unwrap();

        let html = std::fs::read_to_string(output).unwrap();
        assert!(html.contains("<title>Lakeside Recovery Plan</title>"));
        assert!(html.contains("Lakeside Auto"));
        assert!(html.contains("$7,500"));
    }
}
