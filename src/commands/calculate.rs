use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::FunnelConfig;
use crate::core::{PartialInputs, Scenario};
use crate::formatting::FormattingConfig;
use crate::io::{self, OutputFormat};

use super::{emit_report, pick_format};

#[derive(Debug, Clone, Default)]
pub struct CalculateConfig {
    pub scenario: Option<PathBuf>,
    pub inputs: PartialInputs,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

/// Layer built-ins, config defaults, the scenario file and flag overrides.
pub fn build_scenario(
    config: &FunnelConfig,
    scenario_path: Option<&std::path::Path>,
    overrides: PartialInputs,
) -> Result<Scenario> {
    let base = config.default_inputs();

    let scenario = match scenario_path {
        Some(path) => io::load_scenario(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?
            .resolve(base),
        None => Scenario::new(base),
    };

    if !overrides.is_empty() {
        log::debug!("Applying command-line input overrides: {:?}", overrides);
    }

    Ok(Scenario {
        inputs: overrides.overlay(scenario.inputs),
        ..scenario
    })
}

pub fn handle_calculate(calc: CalculateConfig, config: &FunnelConfig) -> Result<()> {
    let scenario = build_scenario(config, calc.scenario.as_deref(), calc.inputs)?;
    let format = pick_format(calc.format, calc.output.as_deref(), config);
    let formatting = FormattingConfig::resolve(calc.plain, config.use_color());

    log::debug!("Calculating {:?} report for {:?}", format, scenario.inputs);

    emit_report(
        format,
        &scenario,
        config.report_options(),
        formatting,
        calc.output.as_deref(),
    )
}
