use serde::{Deserialize, Serialize};

use crate::core::{FunnelInputs, PartialInputs};
use crate::errors::{Error, Result};
use crate::io::output::{OutputFormat, ReportOptions, DEFAULT_TAGLINE, DEFAULT_TITLE};

/// Name of the configuration file searched for in ancestor directories.
pub const CONFIG_FILE_NAME: &str = ".funnel-roi.toml";

/// Root configuration structure for funnel-roi
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Overrides for the built-in input defaults
    #[serde(default)]
    pub defaults: Option<PartialInputs>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Report framing text
    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
    pub use_color: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub title: Option<String>,
    pub tagline: Option<String>,
}

impl FunnelConfig {
    /// Built-in defaults with the `[defaults]` table laid over them.
    ///
    /// A configured `close_rate` also seeds `return_close_rate` unless the
    /// latter is set explicitly.
    pub fn default_inputs(&self) -> FunnelInputs {
        let defaults = self.defaults.unwrap_or_default();
        PartialInputs {
            return_close_rate: defaults.return_close_rate.or(defaults.close_rate),
            ..defaults
        }
        .overlay(FunnelInputs::default())
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or(OutputFormat::Terminal)
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.use_color)
    }

    pub fn report_options(&self) -> ReportOptions {
        let report = self.report.clone().unwrap_or_default();
        ReportOptions {
            title: report.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            tagline: report.tagline.unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
            ..ReportOptions::default()
        }
    }

    /// Reject values TOML can express but a funnel cannot use.
    pub fn validate(&self) -> Result<()> {
        if let Some(defaults) = &self.defaults {
            let rates = [
                ("close_rate", defaults.close_rate),
                ("buy_elsewhere_rate", defaults.buy_elsewhere_rate),
                ("follow_up_rate", defaults.follow_up_rate),
                ("connect_rate", defaults.connect_rate),
                ("ai_reach_rate", defaults.ai_reach_rate),
                ("appointment_rate", defaults.appointment_rate),
                ("show_rate", defaults.show_rate),
                ("return_close_rate", defaults.return_close_rate),
                ("gross_profit_per_deal", defaults.gross_profit_per_deal),
                ("tool_cost", defaults.tool_cost),
            ];
            if let Some((name, _)) = rates
                .iter()
                .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
            {
                return Err(Error::validation(format!(
                    "[defaults] {name} must be a finite number"
                )));
            }
        }

        if let Some(title) = self.report.as_ref().and_then(|r| r.title.as_deref()) {
            if title.trim().is_empty() {
                return Err(Error::configuration("[report] title must not be blank"));
            }
        }

        Ok(())
    }
}

/// Commented template written by `funnel-roi init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# funnel-roi configuration

# Starting values for the calculator and the interactive wizard.
# Any field left out keeps its built-in default.
[defaults]
monthly_visitors = 0
close_rate = 27
buy_elsewhere_rate = 50
follow_up_rate = 9
connect_rate = 25
ai_reach_rate = 55
appointment_rate = 55
show_rate = 55
return_close_rate = 27
gross_profit_per_deal = 0
tool_cost = 0

[output]
# terminal, markdown, json or html
default_format = "terminal"
# use_color = true

[report]
title = "Recovery ROI Report"
tagline = "These are YOUR numbers. Your close rate. Your gross. Your opportunity."
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_builtin_defaults() {
        let config: FunnelConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();

        assert_eq!(config.default_inputs(), FunnelInputs::default());
        assert_eq!(config.default_format(), OutputFormat::Terminal);
        assert_eq!(config.use_color(), None);
        assert_eq!(config.report_options().title, DEFAULT_TITLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_builtins() {
        let config = FunnelConfig::default();
        assert_eq!(config.default_inputs(), FunnelInputs::default());
        assert_eq!(config.report_options().tagline, DEFAULT_TAGLINE);
    }

    #[test]
    fn test_configured_close_rate_seeds_return_close_rate() {
        let config: FunnelConfig = toml::from_str("[defaults]\nclose_rate = 35\n").unwrap();
        let inputs = config.default_inputs();
        assert_eq!(inputs.close_rate, 35.0);
        assert_eq!(inputs.return_close_rate, 35.0);

        let config: FunnelConfig =
            toml::from_str("[defaults]\nclose_rate = 35\nreturn_close_rate = 20\n").unwrap();
        assert_eq!(config.default_inputs().return_close_rate, 20.0);
    }

    #[test]
    fn test_non_finite_default_rejected() {
        let config: FunnelConfig = toml::from_str("[defaults]\nshow_rate = nan\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("show_rate"));
    }

    #[test]
    fn test_blank_title_rejected() {
        let config: FunnelConfig = toml::from_str("[report]\ntitle = \"  \"\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }
}
