//! Custom function tag classification
//!
//! Reads the documentation blocks attached to a declaration and decides
//! whether it is a custom function, collecting the auxiliary tags it needs.

use super::jsdoc::{parse_param_tag, DocBlock};
use std::collections::HashMap;

/// Marker tag identifying a custom function (case-insensitive)
pub const CUSTOM_FUNCTION_TAG: &str = "customfunction";

/// Tag carrying the function's help URL (case-insensitive)
pub const HELP_URL_TAG: &str = "helpurl";

/// Tag names documenting a parameter
pub const PARAM_TAGS: &[&str] = &["param", "arg", "argument"];

/// Separator allowed between a parameter name and its description
const DESCRIPTION_SEPARATOR: char = '-';

/// Everything the documentation says about one declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub is_custom_function: bool,
    /// Empty when no help URL tag is present
    pub help_url: String,
    /// Parameter name (as written in the tag) to description
    pub param_descriptions: HashMap<String, String>,
    /// Leading comment of the first documentation block
    pub description: Option<String>,
}

impl TagInfo {
    pub fn param_description(&self, name: &str) -> Option<String> {
        self.param_descriptions.get(name).cloned()
    }
}

/// Classify a declaration from its documentation blocks, in source order
pub fn classify(blocks: &[DocBlock]) -> TagInfo {
    let tags = || blocks.iter().flat_map(|block| block.tags.iter());

    let is_custom_function = tags().any(|tag| tag.is(CUSTOM_FUNCTION_TAG));
    if !is_custom_function {
        return TagInfo::default();
    }

    let help_url = tags()
        .filter(|tag| tag.is(HELP_URL_TAG))
        .filter_map(|tag| tag.comment())
        .last()
        .unwrap_or_default()
        .to_string();

    let param_descriptions = tags()
        .filter(|tag| PARAM_TAGS.contains(&tag.name.as_str()))
        .filter_map(|tag| parse_param_tag(&tag.text))
        .map(|param| {
            let description = param
                .comment
                .as_deref()
                .map(clean_description)
                .unwrap_or_default();
            (param.name, description)
        })
        .collect();

    TagInfo {
        is_custom_function,
        help_url,
        param_descriptions,
        description: blocks.first().and_then(|block| block.comment.clone()),
    }
}

/// Strip one leading separator, then trim
fn clean_description(comment: &str) -> String {
    comment
        .strip_prefix(DESCRIPTION_SEPARATOR)
        .unwrap_or(comment)
        .trim()
        .to_string()
}
