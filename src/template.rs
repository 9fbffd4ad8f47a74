//! Single-placeholder format strings
//!
//! Adapter templates follow the `{}` convention of `format!`: exactly one
//! bare `{}` marks where content goes, and `{{` / `}}` stand for literal
//! braces. Templates are parsed once, when an adapter is built, so a bad
//! pattern is reported at registration rather than on the first request.

use std::fmt;

use crate::error::{PromptError, Result};

/// A parsed format string with at most one substitution point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    prefix: String,
    suffix: Option<String>,
}

impl Template {
    /// Parse a pattern containing zero or one `{}` placeholders
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidTemplate`] for named or positional
    /// fields, unbalanced braces, or more than one placeholder
    pub fn parse(raw: &str) -> Result<Self> {
        let mut prefix = String::with_capacity(raw.len());
        let mut suffix: Option<String> = None;
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            let next = chars.peek().copied();
            let literal = match (c, next) {
                ('{', Some('{')) => {
                    chars.next();
                    '{'
                }
                ('}', Some('}')) => {
                    chars.next();
                    '}'
                }
                ('{', Some('}')) => {
                    chars.next();
                    if suffix.is_some() {
                        return Err(PromptError::invalid_template(
                            raw,
                            "more than one `{}` placeholder",
                        ));
                    }
                    suffix = Some(String::new());
                    continue;
                }
                ('{', _) => {
                    return Err(PromptError::invalid_template(
                        raw,
                        "only bare `{}` placeholders are supported",
                    ));
                }
                ('}', _) => {
                    return Err(PromptError::invalid_template(raw, "unmatched `}`"));
                }
                (c, _) => c,
            };

            match suffix.as_mut() {
                Some(tail) => tail.push(literal),
                None => prefix.push(literal),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            prefix,
            suffix,
        })
    }

    /// Wrap `raw` as verbatim text with no substitution point
    ///
    /// Braces are not interpreted, so the text renders exactly as given.
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            prefix: raw.to_string(),
            suffix: None,
        }
    }

    /// Parse a pattern that must contain exactly one placeholder
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidTemplate`] if the pattern is malformed
    /// or has no placeholder
    pub fn parse_single(raw: &str) -> Result<Self> {
        let template = Self::parse(raw)?;
        if template.placeholders() != 1 {
            return Err(PromptError::invalid_template(
                raw,
                "expected exactly one `{}` placeholder",
            ));
        }
        Ok(template)
    }

    /// Number of substitution points (0 or 1)
    #[must_use]
    pub const fn placeholders(&self) -> usize {
        if self.suffix.is_some() {
            1
        } else {
            0
        }
    }

    /// Substitute `content` into the placeholder
    ///
    /// A template without a placeholder renders as its literal text.
    #[must_use]
    pub fn format(&self, content: &str) -> String {
        match &self.suffix {
            Some(suffix) => {
                let mut out =
                    String::with_capacity(self.prefix.len() + content.len() + suffix.len());
                out.push_str(&self.prefix);
                out.push_str(content);
                out.push_str(suffix);
                out
            }
            None => self.prefix.clone(),
        }
    }

    /// Literal text before the placeholder (the whole text if there is none)
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The pattern as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
