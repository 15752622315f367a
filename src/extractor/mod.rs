//! Custom function metadata extraction
//!
//! This module turns an annotated TypeScript or JavaScript source file into
//! custom function metadata:
//!
//! - Parsing (`parser`): tree-sitter grammars for JS/TS/JSX/TSX
//! - Tree walking (`visitor`): top-level function declarations in document order
//! - Tag classification (`jsdoc`, `tags`): `@customfunction`, `@helpurl`, `@param`
//! - Signature analysis (`signature`): value type and dimensionality of
//!   parameters and results, including `Promise<T>` and streaming handlers
//!
//! # Example
//!
//! ```ignore
//! use cfmeta::extractor::extract_source;
//! use std::path::Path;
//!
//! let report = extract_source(source_code, Path::new("functions.ts"))?;
//! if report.is_success() {
//!     println!("{} custom functions", report.function_count());
//! }
//! ```

pub mod jsdoc;
pub mod metadata;
pub mod parser;
pub mod signature;
pub mod tags;
pub mod visitor;

use crate::errors::{CfMetaError, ExtractionReport, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

pub use metadata::{
    Dimensionality, FunctionMetadata, FunctionOptions, FunctionsManifest, ParameterMetadata,
    ResultMetadata, ValueType,
};
pub use parser::{detect_variant, parse_source, SourceAst, SourceVariant};
pub use visitor::extract_metadata;

/// Parse source text and extract its custom function metadata
pub fn extract_source(content: &str, path: &Path) -> Result<ExtractionReport> {
    let ast = parse_source(content, path, detect_variant(path))?;
    Ok(extract_metadata(&ast))
}

/// Read a source file fully and extract its custom function metadata
pub fn extract_file(path: &Path) -> Result<ExtractionReport> {
    let bytes =
        fs::read(path).map_err(|e| CfMetaError::file_system("Failed to read source file", path, e))?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        log::warn!(
            "{} is not valid UTF-8; invalid bytes were replaced",
            path.display()
        );
    }
    extract_source(&content, path)
}
