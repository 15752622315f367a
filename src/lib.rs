// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod io;

// Re-export commonly used types
pub use crate::errors::{CfMetaError, DeclarationOutcome, ExtractionReport};

pub use crate::extractor::{
    extract_file, extract_metadata, extract_source, Dimensionality, FunctionMetadata,
    FunctionOptions, FunctionsManifest, ParameterMetadata, ResultMetadata, SourceVariant,
    ValueType,
};

pub use crate::config::{CfMetaConfig, ExtractSettings};

pub use crate::commands::{run_extract, RunStatus};
