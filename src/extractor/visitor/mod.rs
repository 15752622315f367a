//! AST visitor for custom function extraction
//!
//! Walks the tree-sitter AST depth-first in document order and analyzes every
//! top-level function declaration. Nested declarations are visited but never
//! selected.

pub mod function_analysis;
pub mod helpers;

use crate::errors::{DeclarationOutcome, ExtractionReport};
use crate::extractor::parser::SourceAst;

use function_analysis::analyze_declaration;
use helpers::{is_function_declaration, is_top_level};

/// Extract custom function metadata from a parsed source file
pub fn extract_metadata(ast: &SourceAst) -> ExtractionReport {
    visit(ast).into_iter().collect()
}

/// Pre-order walk with a tree cursor, recording one outcome per top-level
/// declaration. Does not recurse, whatever the nesting depth.
fn visit(ast: &SourceAst) -> Vec<DeclarationOutcome> {
    let mut outcomes = Vec::new();
    let mut cursor = ast.tree.walk();

    loop {
        let node = cursor.node();
        if is_function_declaration(&node) && is_top_level(&node) {
            outcomes.push(analyze_declaration(&node, ast));
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return outcomes;
            }
        }
    }
}
