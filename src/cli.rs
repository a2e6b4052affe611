use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::PartialInputs;

#[derive(Parser, Debug)]
#[command(name = "funnel-roi")]
#[command(about = "Project recovered sales and ROI from unsold funnel traffic", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .funnel-roi.toml)
    #[arg(long, global = true, env = "FUNNEL_ROI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute metrics from flags and/or a scenario file
    Calculate {
        /// Scenario file (.toml or .json) supplying inputs and contact
        #[arg(long)]
        scenario: Option<PathBuf>,

        #[command(flatten)]
        inputs: InputArgs,

        /// Output format (defaults to [output] default_format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use plain ASCII output without colors or emoji
        #[arg(long)]
        plain: bool,
    },

    /// Walk through the inputs step by step
    Wizard {
        /// Output format for the final report
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Also write the final report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the collected scenario (.toml or .json) for later runs
        #[arg(long = "save-scenario")]
        save_scenario: Option<PathBuf>,

        /// Use plain ASCII output without colors or emoji
        #[arg(long)]
        plain: bool,
    },

    /// Render a printable report for a saved scenario
    Report {
        /// Scenario file (.toml or .json)
        #[arg(long)]
        scenario: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Per-field input overrides; these win over config and scenario values.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct InputArgs {
    /// Prospective customers per month
    #[arg(long, allow_negative_numbers = true)]
    pub visitors: Option<i64>,

    /// Current close rate (%)
    #[arg(long, allow_negative_numbers = true)]
    pub close_rate: Option<f64>,

    /// Unsold visitors who buy from a competitor (%)
    #[arg(long, allow_negative_numbers = true)]
    pub buy_elsewhere_rate: Option<f64>,

    /// Unsold visitors who get a follow-up today (%)
    #[arg(long, allow_negative_numbers = true)]
    pub follow_up_rate: Option<f64>,

    /// Follow-up attempts that connect (%)
    #[arg(long, allow_negative_numbers = true)]
    pub connect_rate: Option<f64>,

    /// Unsold visitors reached by the recovery process (%)
    #[arg(long, allow_negative_numbers = true)]
    pub ai_reach_rate: Option<f64>,

    /// Reached contacts who book an appointment (%)
    #[arg(long, allow_negative_numbers = true)]
    pub appointment_rate: Option<f64>,

    /// Appointments that show up (%)
    #[arg(long, allow_negative_numbers = true)]
    pub show_rate: Option<f64>,

    /// Returning visitors who buy (%); follows --close-rate when omitted
    #[arg(long, allow_negative_numbers = true)]
    pub return_close_rate: Option<f64>,

    /// Gross profit per deal
    #[arg(long = "gross-profit", allow_negative_numbers = true)]
    pub gross_profit_per_deal: Option<f64>,

    /// Monthly cost of the recovery process
    #[arg(long, allow_negative_numbers = true)]
    pub tool_cost: Option<f64>,
}

impl InputArgs {
    pub fn to_partial(&self) -> PartialInputs {
        PartialInputs {
            monthly_visitors: self.visitors,
            close_rate: self.close_rate,
            buy_elsewhere_rate: self.buy_elsewhere_rate,
            follow_up_rate: self.follow_up_rate,
            connect_rate: self.connect_rate,
            ai_reach_rate: self.ai_reach_rate,
            appointment_rate: self.appointment_rate,
            show_rate: self.show_rate,
            return_close_rate: self.return_close_rate.or(self.close_rate),
            gross_profit_per_deal: self.gross_profit_per_deal,
            tool_cost: self.tool_cost,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
    Html,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Html => crate::io::output::OutputFormat::Html,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Html),
            crate::io::output::OutputFormat::Html
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Markdown),
            crate::io::output::OutputFormat::Markdown
        );
    }

    #[test]
    fn test_cli_parsing_calculate_command() {
        let args = vec![
            "funnel-roi",
            "calculate",
            "--visitors",
            "100",
            "--gross-profit",
            "3000",
            "--tool-cost",
            "1500",
            "--format",
            "json",
            "-vv",
        ];

        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbosity, 2);

        match cli.command {
            Commands::Calculate {
                inputs,
                format,
                scenario,
                ..
            } => {
                assert_eq!(inputs.visitors, Some(100));
                assert_eq!(inputs.gross_profit_per_deal, Some(3000.0));
                assert_eq!(inputs.tool_cost, Some(1500.0));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(scenario, None);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_parsing_accepts_negative_and_out_of_range_rates() {
        let cli = Cli::try_parse_from(vec![
            "funnel-roi",
            "calculate",
            "--visitors",
            "-5",
            "--close-rate",
            "-10",
            "--show-rate",
            "140",
            "--return-close-rate",
            "-2.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Calculate { inputs, .. } => {
                assert_eq!(inputs.visitors, Some(-5));
                assert_eq!(inputs.close_rate, Some(-10.0));
                assert_eq!(inputs.show_rate, Some(140.0));
                assert_eq!(inputs.return_close_rate, Some(-2.5));
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_close_rate_flag_links_return_close_rate() {
        let args = InputArgs {
            close_rate: Some(35.0),
            ..Default::default()
        };
        assert_eq!(args.to_partial().return_close_rate, Some(35.0));

        let args = InputArgs {
            close_rate: Some(35.0),
            return_close_rate: Some(20.0),
            ..Default::default()
        };
        assert_eq!(args.to_partial().return_close_rate, Some(20.0));
    }

    #[test]
    fn test_cli_parsing_report_defaults_to_html() {
        let cli = Cli::parse_from(vec!["funnel-roi", "report", "--scenario", "q3.toml"]);

        match cli.command {
            Commands::Report {
                scenario,
                format,
                output,
            } => {
                assert_eq!(scenario, PathBuf::from("q3.toml"));
                assert_eq!(format, OutputFormat::Html);
                assert_eq!(output, None);
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(vec!["funnel-roi", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_report_requires_scenario() {
        let result = Cli::try_parse_from(vec!["funnel-roi", "report"]);
        assert!(result.is_err());
    }
}
