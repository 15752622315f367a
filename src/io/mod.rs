pub mod output;

pub use output::{ConsoleReporter, JsonWriter, ManifestWriter};

use crate::errors::{CfMetaError, Result};
use std::fs;
use std::path::Path;

/// Write `content` to `path` in a single operation, creating parent directories
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content)
        .map_err(|e| CfMetaError::file_system("Failed to write output file", path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| CfMetaError::file_system("Failed to create directory", path, e))?;
    }
    Ok(())
}
