//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing using tree-sitter grammars for JS/TS/JSX/TSX.

use crate::errors::CfMetaError;
use std::path::{Path, PathBuf};
use tree_sitter::{Language as TsLanguage, Parser, Tree};

/// Source dialect, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVariant {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "cjs" => Some(SourceVariant::JavaScript),
            "jsx" => Some(SourceVariant::Jsx),
            "ts" | "mts" | "cts" => Some(SourceVariant::TypeScript),
            "tsx" => Some(SourceVariant::Tsx),
            _ => None,
        }
    }

    /// Whether the dialect carries type annotations
    pub fn is_typed(&self) -> bool {
        matches!(self, SourceVariant::TypeScript | SourceVariant::Tsx)
    }
}

/// A parsed source file
#[derive(Debug, Clone)]
pub struct SourceAst {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
    pub variant: SourceVariant,
}

/// Get the tree-sitter language for a source variant
fn get_language(variant: SourceVariant) -> TsLanguage {
    match variant {
        SourceVariant::JavaScript | SourceVariant::Jsx => tree_sitter_javascript::LANGUAGE.into(),
        SourceVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        SourceVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse JavaScript/TypeScript source code into a tree-sitter AST.
///
/// Recoverable syntax errors are logged and the partial tree is kept.
pub fn parse_source(
    content: &str,
    path: &Path,
    variant: SourceVariant,
) -> Result<SourceAst, CfMetaError> {
    let mut parser = Parser::new();
    let language = get_language(variant);

    parser
        .set_language(&language)
        .map_err(|e| CfMetaError::parse(path, format!("Failed to set tree-sitter language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| CfMetaError::parse(path, "Failed to parse source code"))?;

    if has_parse_errors(&tree) {
        log::warn!(
            "{} contains syntax errors; extracting from the recoverable parts",
            path.display()
        );
    }

    Ok(SourceAst {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
        variant,
    })
}

/// Determine source variant from file path, defaulting to TypeScript
pub fn detect_variant(path: &Path) -> SourceVariant {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceVariant::from_extension)
        .unwrap_or(SourceVariant::TypeScript)
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &tree_sitter::Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    &source[start..end]
}
