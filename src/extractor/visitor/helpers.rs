//! Helper functions for walking TypeScript/JavaScript declarations
//!
//! Node selection, documentation lookup and lowering of tree-sitter type
//! nodes into [`TypeAnnotation`].

use crate::extractor::jsdoc::DocBlock;
use crate::extractor::parser::node_text;
use crate::extractor::signature::{TypeAnnotation, TypeShape};
use tree_sitter::Node;

/// Node kinds that declare a named function
pub const DECLARATION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
];

/// Function expressions declared by `export default function () {}`
const DEFAULT_EXPORT_KINDS: &[&str] = &["function_expression", "function", "generator_function"];

/// Statements that wrap a declaration without opening a new scope
const WRAPPER_KINDS: &[&str] = &["export_statement", "ambient_declaration"];

/// A declared parameter before type resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParameter {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
}

pub fn is_function_declaration(node: &Node) -> bool {
    if DECLARATION_KINDS.contains(&node.kind()) {
        return true;
    }
    node.is_named()
        && DEFAULT_EXPORT_KINDS.contains(&node.kind())
        && node
            .parent()
            .is_some_and(|parent| parent.kind() == "export_statement")
}

/// Outermost `export`/`declare` statement wrapping the node, or the node itself
pub fn doc_anchor<'tree>(node: &Node<'tree>) -> Node<'tree> {
    let mut anchor = *node;
    while let Some(parent) = anchor.parent() {
        if !WRAPPER_KINDS.contains(&parent.kind()) {
            break;
        }
        anchor = parent;
    }
    anchor
}

/// A declaration is top-level when it (or its wrapping statement) sits directly in the program
pub fn is_top_level(node: &Node) -> bool {
    doc_anchor(node)
        .parent()
        .is_some_and(|parent| parent.kind() == "program")
}

/// Documentation blocks immediately preceding the declaration, in source order
pub fn leading_doc_blocks(node: &Node, source: &str) -> Vec<DocBlock> {
    let mut comments = Vec::new();
    let mut previous = doc_anchor(node).prev_sibling();
    while let Some(sibling) = previous {
        if sibling.kind() != "comment" {
            break;
        }
        comments.push(node_text(&sibling, source));
        previous = sibling.prev_sibling();
    }

    comments
        .into_iter()
        .rev()
        .filter_map(DocBlock::parse)
        .collect()
}

/// Declared function name, if any
pub fn function_name(node: &Node, source: &str) -> Option<String> {
    node.child_by_field_name("name")
        .map(|name| node_text(&name, source).to_string())
}

/// Declared parameters in source order
pub fn declared_parameters(node: &Node, source: &str) -> Vec<DeclaredParameter> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    code_children(&params)
        .into_iter()
        .map(|param| match param.kind() {
            // TypeScript wraps each parameter with its annotation
            "required_parameter" | "optional_parameter" => DeclaredParameter {
                name: param
                    .child_by_field_name("pattern")
                    .map(|pattern| pattern_name(&pattern, source))
                    .unwrap_or_else(|| node_text(&param, source).to_string()),
                annotation: annotation_field(&param, "type", source),
            },
            // JavaScript parameters are bare patterns
            _ => DeclaredParameter {
                name: pattern_name(&param, source),
                annotation: None,
            },
        })
        .collect()
}

/// Declared return annotation
pub fn return_annotation(node: &Node, source: &str) -> Option<TypeAnnotation> {
    annotation_field(node, "return_type", source)
}

/// Lower the annotation stored in `field` of `node`
fn annotation_field(node: &Node, field: &str, source: &str) -> Option<TypeAnnotation> {
    let annotation = node.child_by_field_name(field)?;
    if annotation.kind() == "type_annotation" {
        let inner = code_children(&annotation).into_iter().next()?;
        Some(lower_type(&inner, source))
    } else {
        // asserts / type predicate annotations
        Some(lower_type(&annotation, source))
    }
}

/// Lower a tree-sitter type node into a [`TypeAnnotation`]
pub fn lower_type(node: &Node, source: &str) -> TypeAnnotation {
    let text = node_text(node, source);
    let shape = match node.kind() {
        "predefined_type" => TypeShape::Primitive(text.to_string()),
        "type_identifier" | "nested_type_identifier" => TypeShape::Named {
            name: text.to_string(),
            args: Vec::new(),
        },
        "generic_type" => TypeShape::Named {
            name: node
                .child_by_field_name("name")
                .map(|name| node_text(&name, source).to_string())
                .unwrap_or_default(),
            args: node
                .child_by_field_name("type_arguments")
                .map(|args| {
                    code_children(&args)
                        .iter()
                        .map(|arg| lower_type(arg, source))
                        .collect()
                })
                .unwrap_or_default(),
        },
        "array_type" => match code_children(node).first() {
            Some(element) => TypeShape::ArrayOf(Box::new(lower_type(element, source))),
            None => TypeShape::Other,
        },
        _ => TypeShape::Other,
    };
    TypeAnnotation::new(shape, text)
}

/// Name bound by a parameter pattern
fn pattern_name(node: &Node, source: &str) -> String {
    match node.kind() {
        "assignment_pattern" => node
            .child_by_field_name("left")
            .map(|left| pattern_name(&left, source))
            .unwrap_or_else(|| node_text(node, source).to_string()),
        "rest_pattern" => code_children(node)
            .first()
            .map(|inner| pattern_name(inner, source))
            .unwrap_or_else(|| node_text(node, source).to_string()),
        _ => node_text(node, source).to_string(),
    }
}

/// Named children, skipping comments
fn code_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}
