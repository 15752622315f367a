//! Signature analysis
//!
//! Maps type annotations to a semantic value type and dimensionality. The
//! analyzer works on [`TypeAnnotation`], a small parser-independent shape
//! tree, so the matching rules can be exercised without tree-sitter.
//!
//! Rules, in precedence order:
//!
//! 1. no annotation: `any`, scalar
//! 2. a named reference other than `Array` is invalid
//! 3. `Array<T>` reads the element kind from `T`; `Array<Array<T>>` from the
//!    innermost `T`
//! 4. `T[][]` reads the element kind from `T`; `T[]` alone is invalid
//! 5. the element kind must be `number`, `string` or `boolean`
//!
//! Any array or reference shape at the top level is a matrix.

use super::metadata::{Dimensionality, TypeMapping, ValueType};
use thiserror::Error;

/// Name of the generic array reference
pub const ARRAY_TYPE: &str = "Array";

/// Name of the asynchronous result wrapper
pub const ASYNC_WRAPPER: &str = "Promise";

/// Accepted names of the streaming handler type, current first
pub const STREAMING_HANDLER_TYPES: &[&str] = &[
    "CustomFunctions.StreamingHandler",
    "IStreamingCustomFunctionHandler",
];

/// Shape of a type annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Predefined keyword type: `number`, `string`, `any`, `void`, ...
    Primitive(String),
    /// Native array syntax `T[]`
    ArrayOf(Box<TypeAnnotation>),
    /// Named reference with optional type arguments: `Foo`, `Array<T>`, `Promise<T>`
    Named {
        name: String,
        args: Vec<TypeAnnotation>,
    },
    /// Anything else (unions, literals, object types, ...)
    Other,
}

/// A type annotation together with its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAnnotation {
    pub shape: TypeShape,
    pub text: String,
}

impl TypeAnnotation {
    pub fn new(shape: TypeShape, text: impl Into<String>) -> Self {
        Self {
            shape,
            text: text.into(),
        }
    }

    pub fn primitive(keyword: &str) -> Self {
        Self::new(TypeShape::Primitive(keyword.to_string()), keyword)
    }

    pub fn array_of(inner: TypeAnnotation) -> Self {
        let text = format!("{}[]", inner.text);
        Self::new(TypeShape::ArrayOf(Box::new(inner)), text)
    }

    pub fn named(name: &str, args: Vec<TypeAnnotation>) -> Self {
        let text = if args.is_empty() {
            name.to_string()
        } else {
            let args_text: Vec<&str> = args.iter().map(|a| a.text.as_str()).collect();
            format!("{}<{}>", name, args_text.join(", "))
        };
        Self::new(
            TypeShape::Named {
                name: name.to_string(),
                args,
            },
            text,
        )
    }

    /// Name of a named reference
    pub fn reference_name(&self) -> Option<&str> {
        match &self.shape {
            TypeShape::Named { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Type arguments of a named reference
    pub fn type_args(&self) -> &[TypeAnnotation] {
        match &self.shape {
            TypeShape::Named { args, .. } => args.as_slice(),
            _ => &[],
        }
    }

    /// `Array<T>` with exactly one argument: returns `T`
    pub fn as_single_array(&self) -> Option<&TypeAnnotation> {
        match self.type_args() {
            [inner] if self.reference_name() == Some(ARRAY_TYPE) => Some(inner),
            _ => None,
        }
    }

    /// `Promise<T>` with exactly one argument: returns `T`
    pub fn as_async(&self) -> Option<&TypeAnnotation> {
        match self.type_args() {
            [inner] if self.reference_name() == Some(ASYNC_WRAPPER) => Some(inner),
            _ => None,
        }
    }

    /// Reference to a streaming handler, whatever its arguments
    pub fn is_streaming_handler(&self) -> bool {
        self.reference_name()
            .is_some_and(|name| STREAMING_HANDLER_TYPES.contains(&name))
    }

    pub fn is_void(&self) -> bool {
        self.text.trim() == "void"
    }
}

/// A shape that cannot be registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Invalid type array: {0}")]
    InvalidTypeArray(String),

    #[error("Invalid array type node: {0}")]
    InvalidArrayTypeNode(String),

    #[error("Type doesn't match mappings")]
    UnmappedType,

    #[error("The 'CustomFunctions.StreamingHandler' needs to be passed in a single result type (e.g., 'CustomFunctions.StreamingHandler < number >')")]
    StreamingHandlerArity,

    #[error("A streaming function should not have a return type.  Instead, its type should be based purely on what's inside \"CustomFunctions.StreamingHandler<T>\".")]
    StreamingReturnType,

    #[error("Custom function declaration is missing a name")]
    AnonymousFunction,
}

/// Resolve the mapping of a parameter or result annotation
pub fn resolve_type(annotation: Option<&TypeAnnotation>) -> Result<TypeMapping, ShapeError> {
    let Some(annotation) = annotation else {
        return Ok(TypeMapping::untyped());
    };

    let element = element_of(annotation)?;
    let value_type = match &element.shape {
        TypeShape::Primitive(keyword) => ValueType::from_keyword(keyword),
        _ => None,
    }
    .ok_or(ShapeError::UnmappedType)?;

    Ok(TypeMapping::new(value_type, dimensionality(Some(annotation))))
}

/// Dimensionality of an annotation, judged from its top-level shape only
pub fn dimensionality(annotation: Option<&TypeAnnotation>) -> Dimensionality {
    match annotation.map(|a| &a.shape) {
        Some(TypeShape::Named { .. } | TypeShape::ArrayOf(_)) => Dimensionality::Matrix,
        _ => Dimensionality::Scalar,
    }
}

/// Find the annotation whose kind decides the value type
fn element_of(annotation: &TypeAnnotation) -> Result<&TypeAnnotation, ShapeError> {
    match &annotation.shape {
        TypeShape::Named { name, .. } => {
            if name != ARRAY_TYPE {
                return Err(ShapeError::InvalidType(name.clone()));
            }
            match annotation.as_single_array() {
                Some(inner) if matches!(inner.shape, TypeShape::Named { .. }) => inner
                    .as_single_array()
                    .ok_or_else(|| ShapeError::InvalidTypeArray(inner.text.clone())),
                Some(inner) => Ok(inner),
                // `Array` without exactly one argument falls through to the mapping check
                None => Ok(annotation),
            }
        }
        TypeShape::ArrayOf(inner) => match &inner.shape {
            TypeShape::ArrayOf(element) => Ok(&**element),
            _ => Err(ShapeError::InvalidArrayTypeNode(inner.text.clone())),
        },
        TypeShape::Primitive(_) | TypeShape::Other => Ok(annotation),
    }
}

/// Resolve a function's result from its declared return annotation.
///
/// `Promise<T>` resolves from `T`; any other wrapper arity is analyzed as a
/// plain return type.
pub fn resolve_return(annotation: Option<&TypeAnnotation>) -> Result<TypeMapping, ShapeError> {
    match annotation {
        Some(ret) => resolve_type(Some(ret.as_async().unwrap_or(ret))),
        None => Ok(TypeMapping::untyped()),
    }
}

/// Resolve the result of a streaming function from its handler parameter.
///
/// The handler must carry exactly one type argument and the function must not
/// declare a return type other than `void`.
pub fn resolve_streaming_result(
    handler: &TypeAnnotation,
    declared_return: Option<&TypeAnnotation>,
) -> Result<TypeMapping, ShapeError> {
    let [result] = handler.type_args() else {
        return Err(ShapeError::StreamingHandlerArity);
    };
    if declared_return.is_some_and(|ret| !ret.is_void()) {
        return Err(ShapeError::StreamingReturnType);
    }
    resolve_type(Some(result))
}
