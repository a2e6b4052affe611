use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::FunnelConfig;
use crate::formatting::{formatter_for, FormattingConfig};
use crate::io::{self, OutputFormat};
use crate::wizard::{run_session, WizardState};

use super::{emit_report, pick_format};

#[derive(Debug, Clone, Default)]
pub struct WizardConfig {
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub save_scenario: Option<PathBuf>,
    pub plain: bool,
}

/// Run the interactive collector on stdin/stdout, then report.
pub fn run_wizard(wizard: WizardConfig, config: &FunnelConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let formatting = FormattingConfig::resolve(wizard.plain, config.use_color());

    let state = collect(stdin.lock(), stdout.lock(), config, formatting)?;
    let scenario = state.scenario();

    if let Some(path) = &wizard.save_scenario {
        io::save_scenario(path, &scenario)
            .with_context(|| format!("Failed to save scenario to {}", path.display()))?;
    }

    println!();
    emit_report(
        OutputFormat::Terminal,
        &scenario,
        config.report_options(),
        formatting,
        None,
    )?;

    if let Some(path) = &wizard.output {
        let format = pick_format(wizard.format, Some(path.as_path()), config);
        emit_report(
            format,
            &scenario,
            config.report_options(),
            formatting,
            Some(path.as_path()),
        )?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Drive a session starting from the configured defaults.
pub fn collect<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    config: &FunnelConfig,
    formatting: FormattingConfig,
) -> Result<WizardState> {
    let formatter = formatter_for(formatting);
    let state = WizardState::new(config.default_inputs());
    run_session(reader, writer, state, formatter.as_ref())
}
