use std::fs;
use std::path::{Path, PathBuf};

use super::CfMetaConfig;
use crate::errors::{CfMetaError, Result};

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = ".cfmeta.toml";

/// Maximum number of directories searched, starting with the current one
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> std::result::Result<CfMetaConfig, String> {
    toml::from_str::<CfMetaConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load an explicitly requested config file; any failure is an error
pub fn load_config_from_path(path: &Path) -> Result<CfMetaConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CfMetaError::file_system("Failed to read config file", path, e))?;
    let config = parse_config(&contents).map_err(|e| CfMetaError::configuration(path, e))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file, falling back to `None` with a warning
fn try_load_config_from_path(config_path: &Path) -> Option<CfMetaConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
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

/// Search for `.cfmeta.toml` from `start` upward
pub fn load_config(start: PathBuf) -> CfMetaConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CfMetaConfig::default()
        })
}
