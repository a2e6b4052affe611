//! Reading and writing scenario files.
//!
//! The format follows the file extension: `.toml` or `.json`.

use std::fs;
use std::path::Path;

use crate::core::partial::ScenarioFile;
use crate::core::Scenario;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::scenario(
                path,
                "expected a .toml or .json extension",
            )),
        }
    }
}

/// Parse scenario text in the given format.
pub fn parse_scenario(contents: &str, format: ScenarioFormat) -> Result<ScenarioFile> {
    let file: ScenarioFile = match format {
        ScenarioFormat::Toml => toml::from_str(contents)?,
        ScenarioFormat::Json => serde_json::from_str(contents)?,
    };
    Ok(file)
}

pub fn load_scenario(path: &Path) -> Result<ScenarioFile> {
    let format = ScenarioFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    let file = parse_scenario(&contents, format)
        .map_err(|e| Error::scenario(path, e.to_string()))?;
    log::debug!("Loaded scenario from {}", path.display());
    Ok(file)
}

/// Write a complete scenario so it can be fed back with `--scenario`.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<()> {
    let contents = match ScenarioFormat::from_path(path)? {
        ScenarioFormat::Toml => {
            toml::to_string_pretty(scenario).map_err(|e| Error::scenario(path, e.to_string()))?
        }
        ScenarioFormat::Json => serde_json::to_string_pretty(scenario)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    log::info!("Saved scenario to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FunnelInputs, LeadContact};
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.TOML")).unwrap(),
            ScenarioFormat::Toml
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("b.json")).unwrap(),
            ScenarioFormat::Json
        );
        assert!(matches!(
            ScenarioFormat::from_path(Path::new("b.yaml")),
            Err(Error::Scenario { .. })
        ));
    }

    #[test]
    fn test_parse_partial_toml() {
        let file = parse_scenario(
            indoc! {r#"
                [inputs]
                monthly_visitors = 100
                gross_profit_per_deal = 3000
                tool_cost = 1500
            "#},
            ScenarioFormat::Toml,
        )
        .unwrap();

        let scenario = file.resolve(FunnelInputs::default());
        assert_eq!(scenario.inputs.monthly_visitors, 100);
        assert_eq!(scenario.inputs.close_rate, 27.0);
        assert_eq!(scenario.inputs.tool_cost, 1500.0);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_scenario(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_saved_scenario_loads_back() {
        let dir = TempDir::new().unwrap();
        let scenario = Scenario::new(FunnelInputs {
            monthly_visitors: 180,
            tool_cost: 999.0,
            ..FunnelInputs::default()
        })
        .with_contact(LeadContact {
            business_name: "Harbor Cycles".to_string(),
            wants_more_info: true,
            ..LeadContact::default()
        });

        for name in ["saved/run.toml", "saved/run.json"] {
            let path = dir.path().join(name);
            save_scenario(&path, &scenario).unwrap();
            let loaded = load_scenario(&path).unwrap().resolve(FunnelInputs::zeroed());
            assert_eq!(loaded, scenario);
        }
    }
}
