use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use crate::io;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

/// Write the starter config to `path`; refuses to overwrite unless `force`.
pub fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if io::file_exists(path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(path, DEFAULT_CONFIG_TEMPLATE)?;
    log::debug!("Wrote default config to {}", path.display());
    Ok(())
}
