//! Custom function metadata records
//!
//! Core data structures serialized into `functions.json`.

use serde::{Deserialize, Serialize};

/// Semantic value type of a parameter or result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
    /// Untyped source (plain JavaScript or missing annotation)
    Any,
}

impl ValueType {
    /// Map a primitive type keyword (`number`, `string`, `boolean`) to a value type.
    ///
    /// `any` is deliberately absent: an explicit `any` annotation is not a
    /// registrable type, only a missing annotation is.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "number" => Some(ValueType::Number),
            "string" => Some(ValueType::String),
            "boolean" => Some(ValueType::Boolean),
            _ => None,
        }
    }
}

/// Scalar (single value) or matrix (two-dimensional array)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    #[default]
    Scalar,
    Matrix,
}

/// A resolved `(type, dimensionality)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub value_type: ValueType,
    pub dimensionality: Dimensionality,
}

impl TypeMapping {
    pub fn new(value_type: ValueType, dimensionality: Dimensionality) -> Self {
        Self {
            value_type,
            dimensionality,
        }
    }

    /// Mapping used when no annotation is present
    pub fn untyped() -> Self {
        Self::new(ValueType::Any, Dimensionality::Scalar)
    }
}

/// Metadata for a single declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    pub name: String,
    /// Text of the matching `@param` tag; omitted when the parameter is undocumented
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub dimensionality: Dimensionality,
}

impl ParameterMetadata {
    pub fn new(name: String, description: Option<String>, mapping: TypeMapping) -> Self {
        Self {
            name,
            description,
            value_type: mapping.value_type,
            dimensionality: mapping.dimensionality,
        }
    }
}

/// Metadata for a function's result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub dimensionality: Dimensionality,
}

impl From<TypeMapping> for ResultMetadata {
    fn from(mapping: TypeMapping) -> Self {
        Self {
            value_type: mapping.value_type,
            dimensionality: mapping.dimensionality,
        }
    }
}

/// Invocation options of a custom function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionOptions {
    /// Always `false`: synchronous registration is not produced by this tool
    pub sync: bool,
    pub cancelable: bool,
    pub stream: bool,
}

impl FunctionOptions {
    /// Options for a function that reports results through a streaming handler
    pub fn streaming() -> Self {
        Self {
            sync: false,
            cancelable: true,
            stream: true,
        }
    }
}

/// Metadata for one exported custom function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    /// Registration id; always equal to `name`
    pub id: String,
    #[serde(rename = "helpurl")]
    pub help_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Vec<ParameterMetadata>,
    pub result: ResultMetadata,
    pub options: FunctionOptions,
}

impl FunctionMetadata {
    pub fn new(
        name: String,
        help_url: String,
        description: Option<String>,
        parameters: Vec<ParameterMetadata>,
        result: ResultMetadata,
        options: FunctionOptions,
    ) -> Self {
        Self {
            id: name.clone(),
            name,
            help_url,
            description,
            parameters,
            result,
            options,
        }
    }
}

/// Root object of `functions.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionsManifest {
    pub functions: Vec<FunctionMetadata>,
}

impl FunctionsManifest {
    pub fn new(functions: Vec<FunctionMetadata>) -> Self {
        Self { functions }
    }
}
