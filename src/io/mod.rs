pub mod output;
pub mod scenario;
pub mod writers;

pub use output::{create_writer, render_report, OutputFormat, ReportOptions, ReportWriter};
pub use scenario::{load_scenario, save_scenario, ScenarioFormat};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
