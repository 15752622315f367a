//! Configuration for a cfmeta run
//!
//! Settings come from an optional `.cfmeta.toml` file and the command line;
//! command-line values win.

mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_config, CONFIG_FILE_NAME,
};

/// Default output file, relative to the current directory
pub const DEFAULT_OUTPUT: &str = "functions.json";

/// Contents of `.cfmeta.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CfMetaConfig {
    /// Output file for the generated metadata
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Pretty-print the generated JSON
    #[serde(default)]
    pub pretty: Option<bool>,
}

/// Fully resolved settings for one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pretty: bool,
}

impl ExtractSettings {
    /// Merge command-line values over file configuration
    pub fn resolve(
        input: PathBuf,
        output: Option<PathBuf>,
        pretty: bool,
        config: &CfMetaConfig,
    ) -> Self {
        Self {
            input,
            output: output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            pretty: pretty || config.pretty.unwrap_or(false),
        }
    }
}
