//! Function analysis for custom function declarations
//!
//! Turns one top-level function declaration into a [`DeclarationOutcome`].

use crate::errors::DeclarationOutcome;
use crate::extractor::metadata::{FunctionMetadata, FunctionOptions, ParameterMetadata};
use crate::extractor::parser::SourceAst;
use crate::extractor::signature::{
    resolve_return, resolve_streaming_result, resolve_type, ShapeError, TypeAnnotation,
};
use crate::extractor::tags::{classify, CUSTOM_FUNCTION_TAG};
use tree_sitter::Node;

use super::helpers::{
    declared_parameters, function_name, leading_doc_blocks, return_annotation, DeclaredParameter,
};

/// Analyze a top-level function declaration node
pub fn analyze_declaration(node: &Node, ast: &SourceAst) -> DeclarationOutcome {
    let name = function_name(node, &ast.source);
    let tags = classify(&leading_doc_blocks(node, &ast.source));

    if !tags.is_custom_function {
        let name = name.unwrap_or_else(|| "<anonymous>".to_string());
        log::debug!("Skipping {}: no @{} tag", name, CUSTOM_FUNCTION_TAG);
        return DeclarationOutcome::Skipped(name);
    }

    let Some(name) = name else {
        return DeclarationOutcome::Failed(vec![ShapeError::AnonymousFunction.to_string()]);
    };

    let mut declared = declared_parameters(node, &ast.source);
    let handler = split_streaming_handler(&mut declared);
    let declared_return = return_annotation(node, &ast.source);

    let mut errors = Vec::new();
    let mut parameters = Vec::with_capacity(declared.len());
    for param in declared {
        match resolve_type(param.annotation.as_ref()) {
            Ok(mapping) => {
                let description = tags.param_description(&param.name);
                parameters.push(ParameterMetadata::new(param.name, description, mapping));
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    let result = match &handler {
        Some(handler) => resolve_streaming_result(handler, declared_return.as_ref()),
        None => {
            if declared_return.is_none() && ast.variant.is_typed() {
                log::info!(
                    "No return type specified for {}. This could be .js filetype, so continue.",
                    name
                );
            }
            resolve_return(declared_return.as_ref())
        }
    };

    let result = match result {
        Ok(mapping) if errors.is_empty() => mapping,
        Ok(_) => return DeclarationOutcome::Failed(errors),
        Err(e) => {
            errors.push(e.to_string());
            return DeclarationOutcome::Failed(errors);
        }
    };

    let options = if handler.is_some() {
        FunctionOptions::streaming()
    } else {
        FunctionOptions::default()
    };

    log::debug!(
        "Accepted custom function {} with {} parameter(s)",
        name,
        parameters.len()
    );

    DeclarationOutcome::Accepted(FunctionMetadata::new(
        name,
        tags.help_url,
        tags.description,
        parameters,
        result.into(),
        options,
    ))
}

/// Remove a trailing streaming handler parameter, returning its annotation
fn split_streaming_handler(params: &mut Vec<DeclaredParameter>) -> Option<TypeAnnotation> {
    let is_handler = params
        .last()
        .and_then(|param| param.annotation.as_ref())
        .is_some_and(|annotation| annotation.is_streaming_handler());
    if is_handler {
        params.pop().and_then(|param| param.annotation)
    } else {
        None
    }
}
