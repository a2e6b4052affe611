use std::fs;
use std::path::{Path, PathBuf};

use super::core::{FunnelConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<FunnelConfig> {
    let config = toml::from_str::<FunnelConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<FunnelConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
        .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))
}

/// Try one candidate path.
///
/// `None` means no file is there and the search continues. A file that
/// exists but cannot be read or parsed ends the search with defaults.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<FunnelConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!(
                "Failed to read config file {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            return Some(FunnelConfig::default());
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            Some(FunnelConfig::default())
        }
    }
}

/// `start` followed by its parents, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the config file.
pub fn load_config_from(start: PathBuf) -> FunnelConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            FunnelConfig::default()
        })
}

pub fn load_config() -> FunnelConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            FunnelConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::OutputFormat;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn test_directory_ancestors_stops_at_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a"), 10).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[test]
    fn test_config_found_in_parent() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("stores").join("north");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            indoc! {r#"
                [defaults]
                monthly_visitors = 320

                [output]
                default_format = "markdown"
            "#},
        )
        .unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.default_inputs().monthly_visitors, 320);
        assert_eq!(config.default_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[defaults\nbroken").unwrap();

        let config = load_config_from(dir.path().to_path_buf());
        assert_eq!(config, FunnelConfig::default());
    }

    #[test]
    fn test_broken_nearest_config_does_not_fall_through_to_parent() {
        let root = TempDir::new().unwrap();
        let child = root.path().join("east");
        fs::create_dir(&child).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[defaults]\nmonthly_visitors = 999\n",
        )
        .unwrap();
        fs::write(child.join(CONFIG_FILE_NAME), "[defaults\nbroken").unwrap();

        let config = load_config_from(child);
        assert_eq!(config, FunnelConfig::default());
        assert_eq!(config.default_inputs().monthly_visitors, 0);
    }

    #[test]
    fn test_explicit_path_reports_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[output]\ndefault_format = \"pdf\"\n").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("custom.toml"));

        let missing = load_config_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
