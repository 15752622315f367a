//! The extraction command: parse, walk, then write once and report.

use crate::config::ExtractSettings;
use crate::errors::{ExtractionReport, Result};
use crate::extractor::extract_file;
use crate::io::output::{render_manifest, ConsoleReporter};
use crate::io::write_file;
use std::io::Write;
use std::path::PathBuf;

/// How an extraction run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Manifest written to the given path
    Written(PathBuf),
    /// Hard errors were recorded; nothing was written
    Failed,
}

impl RunStatus {
    /// Process exit code for this status
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Written(_) => 0,
            RunStatus::Failed => 1,
        }
    }
}

/// Run an extraction and report the outcome to `console`.
///
/// The output file is written only when the report holds no hard error.
pub fn run_extract<W: Write>(settings: &ExtractSettings, console: W) -> Result<RunStatus> {
    let report = extract_file(&settings.input)?;
    log::debug!(
        "{}: {} accepted, {} skipped, {} error(s)",
        settings.input.display(),
        report.function_count(),
        report.skipped_count(),
        report.error_count()
    );

    let status = write_manifest(settings, &report)?;

    let mut reporter = ConsoleReporter::new(console);
    reporter.report(&report, &settings.input)?;

    Ok(status)
}

fn write_manifest(settings: &ExtractSettings, report: &ExtractionReport) -> Result<RunStatus> {
    let Some(manifest) = report.manifest() else {
        log::debug!("Skipping write of {}", settings.output.display());
        return Ok(RunStatus::Failed);
    };

    let bytes = render_manifest(&manifest, settings.pretty)?;
    write_file(&settings.output, &bytes)?;
    log::info!(
        "Wrote {} custom function(s) to {}",
        manifest.functions.len(),
        settings.output.display()
    );
    Ok(RunStatus::Written(settings.output.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings(dir: &TempDir, source: &str) -> ExtractSettings {
        let input = dir.path().join("functions.ts");
        fs::write(&input, source).unwrap();
        ExtractSettings {
            input,
            output: dir.path().join("out").join("functions.json"),
            pretty: false,
        }
    }

    #[test]
    fn test_success_writes_manifest() {
        let dir = TempDir::new().unwrap();
        let settings = settings(
            &dir,
            "/** @customfunction */\nfunction add(a: number, b: number): number { return a + b; }\nfunction helper() {}\n",
        );
        let mut console = Vec::new();

        let status = run_extract(&settings, &mut console).unwrap();

        assert_eq!(status, RunStatus::Written(settings.output.clone()));
        assert_eq!(status.exit_code(), 0);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&settings.output).unwrap()).unwrap();
        assert_eq!(json["functions"][0]["name"], "add");
        let console = String::from_utf8(console).unwrap();
        assert!(console.starts_with("functions.json created for file: "));
        assert!(console.ends_with("The following functions were skipped.\nhelper\n"));
    }

    #[test]
    fn test_hard_error_suppresses_write() {
        let dir = TempDir::new().unwrap();
        let settings = settings(
            &dir,
            "/** @customfunction */\nfunction ok(a: number): number { return a; }\n\
             /** @customfunction */\nfunction bad(a: number[]): number { return 1; }\n",
        );
        let mut console = Vec::new();

        let status = run_extract(&settings, &mut console).unwrap();

        assert_eq!(status, RunStatus::Failed);
        assert_eq!(status.exit_code(), 1);
        assert!(!settings.output.exists());
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Invalid array type node: number"));
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let settings = ExtractSettings {
            input: dir.path().join("missing.ts"),
            output: dir.path().join("functions.json"),
            pretty: false,
        };

        assert!(run_extract(&settings, Vec::new()).is_err());
        assert!(!settings.output.exists());
    }
}
