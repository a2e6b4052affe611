use anyhow::Result;
use funnel_roi::cli::{Cli, Commands};
use funnel_roi::commands::{self, CalculateConfig, ReportConfig, WizardConfig};
use funnel_roi::config::{self, FunnelConfig};
use std::path::Path;

fn main() -> Result<()> {
    let Cli {
        command,
        config: config_path,
        verbosity,
    } = funnel_roi::cli::parse_args();
    init_logging(verbosity);

    match command {
        Commands::Init { force } => commands::init_config(force),
        command => {
            let config = load_config(config_path.as_deref())?;
            dispatch(command, &config)
        }
    }
}

fn dispatch(command: Commands, config: &FunnelConfig) -> Result<()> {
    match command {
        Commands::Calculate {
            scenario,
            inputs,
            format,
            output,
            plain,
        } => commands::handle_calculate(
            CalculateConfig {
                scenario,
                inputs: inputs.to_partial(),
                format: format.map(Into::into),
                output,
                plain,
            },
            config,
        ),
        Commands::Wizard {
            format,
            output,
            save_scenario,
            plain,
        } => commands::run_wizard(
            WizardConfig {
                format: format.map(Into::into),
                output,
                save_scenario,
                plain,
            },
            config,
        ),
        Commands::Report {
            scenario,
            format,
            output,
        } => commands::generate_report(
            ReportConfig {
                scenario,
                format: format.into(),
                output,
            },
            config,
        ),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn load_config(path: Option<&Path>) -> Result<FunnelConfig> {
    match path {
        Some(path) => Ok(config::load_config_from_path(path)?),
        None => Ok(config::load_config()),
    }
}

// RUST_LOG wins over -v when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
