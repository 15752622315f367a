//! Output of an extraction run: the `functions.json` manifest and the
//! console report.

use crate::errors::{ExtractionReport, Result};
use crate::extractor::metadata::FunctionsManifest;
use std::io::Write;
use std::path::Path;

pub trait ManifestWriter {
    fn write_manifest(&mut self, manifest: &FunctionsManifest) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ManifestWriter for JsonWriter<W> {
    fn write_manifest(&mut self, manifest: &FunctionsManifest) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, manifest)?;
        } else {
            serde_json::to_writer(&mut self.writer, manifest)?;
        }
        Ok(())
    }
}

/// Serialize a manifest to bytes, ready for a single write
pub fn render_manifest(manifest: &FunctionsManifest, pretty: bool) -> Result<Vec<u8>> {
    let mut writer = JsonWriter::new(Vec::new()).pretty(pretty);
    writer.write_manifest(manifest)?;
    Ok(writer.into_inner())
}

/// Prints the end-of-run summary for a source file
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Report a run; the output file is assumed written iff the report succeeded
    pub fn report(&mut self, report: &ExtractionReport, input: &Path) -> std::io::Result<()> {
        if report.is_success() {
            self.write_success(report, input)
        } else {
            self.write_failure(report, input)
        }
    }

    fn write_success(&mut self, report: &ExtractionReport, input: &Path) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "functions.json created for file: {}",
            input.display()
        )?;
        if !report.skipped.is_empty() {
            writeln!(self.writer, "The following functions were skipped.")?;
            for name in &report.skipped {
                writeln!(self.writer, "{}", name)?;
            }
        }
        Ok(())
    }

    fn write_failure(&mut self, report: &ExtractionReport, input: &Path) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "There was one of more errors. We couldn't parse your file: {}",
            input.display()
        )?;
        for error in &report.errors {
            writeln!(self.writer, "{}", error)?;
        }
        Ok(())
    }
}
