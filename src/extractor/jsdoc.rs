//! Documentation comment parser
//!
//! Splits a `/** ... */` block into its leading comment and its `@tag`
//! entries. Only line-leading tags are recognized; inline `{@link ...}`
//! references stay part of the surrounding text.

use regex::Regex;
use std::sync::LazyLock;

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z_][\w-]*)(.*)$").unwrap());

/// A single `@name text` entry of a documentation block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// Tag name as written, without the `@`
    pub name: String,
    /// Trimmed tag text; continuation lines are joined with `\n`
    pub text: String,
}

impl DocTag {
    /// Case-insensitive tag name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Tag text, or `None` when the tag carries no comment
    pub fn comment(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// A parsed documentation block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    /// Free text before the first tag
    pub comment: Option<String>,
    pub tags: Vec<DocTag>,
}

/// A parsed `@param` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub name: String,
    /// Raw comment text, separator not yet stripped
    pub comment: Option<String>,
}

/// Check whether raw comment text is a documentation block (`/**`, not `/**/`)
pub fn is_doc_comment(raw: &str) -> bool {
    raw.starts_with("/**") && !raw.starts_with("/**/") && raw.ends_with("*/")
}

impl DocBlock {
    /// Parse raw comment text including its delimiters.
    ///
    /// Returns `None` for anything that is not a documentation block.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_doc_comment(raw) {
            return None;
        }
        let body = raw.strip_prefix("/**")?.strip_suffix("*/")?;

        let mut comment_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, Vec<&str>)> = Vec::new();

        for line in body.lines().map(clean_line) {
            if let Some(caps) = RE_TAG_LINE.captures(line) {
                let name = caps[1].to_string();
                let rest = caps.get(2).map_or("", |m| m.as_str());
                tags.push((name, vec![rest]));
            } else if let Some((_, lines)) = tags.last_mut() {
                lines.push(line);
            } else {
                comment_lines.push(line);
            }
        }

        let comment = comment_lines.join("\n").trim().to_string();
        Some(DocBlock {
            comment: (!comment.is_empty()).then_some(comment),
            tags: tags
                .into_iter()
                .map(|(name, lines)| DocTag {
                    name,
                    text: lines.join("\n").trim().to_string(),
                })
                .collect(),
        })
    }
}

/// Strip leading whitespace and the conventional `*` gutter from a block line
fn clean_line(line: &str) -> &str {
    let trimmed = line.trim_start();
    let without_gutter = match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    };
    without_gutter.trim_end()
}

/// Parse the text of a parameter tag.
///
/// Accepts `{type} name comment`, `name {type} comment`, optional
/// `[name]` and `[name=default]` forms. Returns `None` when no name is given.
pub fn parse_param_tag(text: &str) -> Option<ParamTag> {
    let rest = skip_type_expression(text.trim_start());

    let (name, rest) = if let Some(bracketed) = rest.strip_prefix('[') {
        let end = bracketed.find(']')?;
        let inner = &bracketed[..end];
        let name = inner.split('=').next().unwrap_or_default().trim();
        (name, &bracketed[end + 1..])
    } else {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        (&rest[..end], &rest[end..])
    };

    if name.is_empty() {
        return None;
    }

    let comment = skip_type_expression(rest.trim_start()).trim();
    Some(ParamTag {
        name: name.to_string(),
        comment: (!comment.is_empty()).then(|| comment.to_string()),
    })
}

/// Skip a leading balanced `{...}` type expression, if any
fn skip_type_expression(text: &str) -> &str {
    if !text.starts_with('{') {
        return text;
    }
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return text[idx + 1..].trim_start();
                }
            }
            _ => {}
        }
    }
    // Unterminated type expression swallows the rest of the tag
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_is_doc_comment() {
        assert!(is_doc_comment("/** doc */"));
        assert!(is_doc_comment("/**\n * doc\n */"));
        assert!(!is_doc_comment("/* plain */"));
        assert!(!is_doc_comment("/**/"));
        assert!(!is_doc_comment("// line"));
    }

    #[test]
    fn test_parse_block_with_comment_and_tags() {
        let raw = indoc! {"
            /**
             * Adds two numbers.
             * Second line.
             * @customfunction
             * @param first First number
             * @param second - Second number
             *   continues here
             * @helpurl https://example.com/add
             */"};

        let block = DocBlock::parse(raw).unwrap();
        assert_eq!(
            block.comment.as_deref(),
            Some("Adds two numbers.\nSecond line.")
        );
        assert_eq!(block.tags.len(), 4);
        assert_eq!(block.tags[0].name, "customfunction");
        assert_eq!(block.tags[0].comment(), None);
        assert_eq!(block.tags[1].text, "first First number");
        assert_eq!(block.tags[2].text, "second - Second number\n  continues here");
        assert_eq!(block.tags[3].comment(), Some("https://example.com/add"));
    }

    #[test]
    fn test_parse_single_line_block() {
        let block = DocBlock::parse("/** @CustomFunction */").unwrap();
        assert_eq!(block.comment, None);
        assert_eq!(block.tags.len(), 1);
        assert!(block.tags[0].is("customfunction"));

        let block = DocBlock::parse("/** Just text. */").unwrap();
        assert_eq!(block.comment.as_deref(), Some("Just text."));
        assert!(block.tags.is_empty());
    }

    #[test]
    fn test_inline_link_is_not_a_tag() {
        let block = DocBlock::parse("/**\n * See {@link other} for details.\n */").unwrap();
        assert_eq!(
            block.comment.as_deref(),
            Some("See {@link other} for details.")
        );
        assert!(block.tags.is_empty());
    }

    #[test]
    fn test_parse_param_tag_forms() {
        assert_eq!(
            parse_param_tag("x the value"),
            Some(ParamTag {
                name: "x".to_string(),
                comment: Some("the value".to_string()),
            })
        );
        assert_eq!(
            parse_param_tag("{number} x - the value"),
            Some(ParamTag {
                name: "x".to_string(),
                comment: Some("- the value".to_string()),
            })
        );
        assert_eq!(
            parse_param_tag("{Array<{a: number}>} rows"),
            Some(ParamTag {
                name: "rows".to_string(),
                comment: None,
            })
        );
        assert_eq!(
            parse_param_tag("[count=10] how many"),
            Some(ParamTag {
                name: "count".to_string(),
                comment: Some("how many".to_string()),
            })
        );
        assert_eq!(
            parse_param_tag("name {string} who to greet"),
            Some(ParamTag {
                name: "name".to_string(),
                comment: Some("who to greet".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_param_tag_without_name() {
        assert_eq!(parse_param_tag(""), None);
        assert_eq!(parse_param_tag("{number}"), None);
        assert_eq!(parse_param_tag("[unterminated"), None);
    }
}
