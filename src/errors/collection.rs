//! Diagnostic collection for a single extraction run.
//!
//! Every top-level declaration produces exactly one [`DeclarationOutcome`].
//! The driver folds them, in walk order, into an [`ExtractionReport`] holding
//! the accepted records, the skipped names and the hard errors. Nothing is
//! ever removed once recorded.

use crate::extractor::metadata::{FunctionMetadata, FunctionsManifest};

/// Result of analyzing one top-level function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationOutcome {
    /// Custom function with fully resolved metadata
    Accepted(FunctionMetadata),
    /// No custom function marker; carries the declaration name
    Skipped(String),
    /// Custom function whose signature could not be mapped
    Failed(Vec<String>),
}

/// Everything one run over a source file produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub functions: Vec<FunctionMetadata>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one declaration outcome
    pub fn record(&mut self, outcome: DeclarationOutcome) {
        match outcome {
            DeclarationOutcome::Accepted(metadata) => self.functions.push(metadata),
            DeclarationOutcome::Skipped(name) => self.skipped.push(name),
            DeclarationOutcome::Failed(errors) => self.errors.extend(errors),
        }
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// A run succeeds only when no hard error was recorded
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Manifest to write, available only for a successful run
    pub fn manifest(&self) -> Option<FunctionsManifest> {
        self.is_success()
            .then(|| FunctionsManifest::new(self.functions.clone()))
    }
}

impl FromIterator<DeclarationOutcome> for ExtractionReport {
    fn from_iter<I: IntoIterator<Item = DeclarationOutcome>>(iter: I) -> Self {
        let mut report = ExtractionReport::new();
        for outcome in iter {
            report.record(outcome);
        }
        report
    }
}
