//! `.funnel-roi.toml` discovery, parsing and the `init` template.

mod core;
mod loader;

pub use self::core::{
    FunnelConfig, OutputConfig, ReportConfig, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
};
