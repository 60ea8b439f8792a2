//! Slot templates: parsing and interpolation of `{key}` placeholders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::answers::AnswerMap;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("empty braces")]
    EmptyBraces,
    #[error("nested braces are not allowed")]
    NestedBraces,
    #[error("unclosed brace")]
    UnclosedBrace,
    #[error("unmatched closing brace")]
    UnmatchedClose,
    #[error("invalid placeholder key '{0}': expected ASCII letters, digits or '_'")]
    InvalidKey(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Answer lookup: `{key}` or `{key|default text}`.
    Slot { key: String, default: Option<String> },
}

/// A parsed template, as segments in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{key}` → `Slot` with no default
    /// - `{key|text}` → `Slot` falling back to `text` when `key` is unanswered
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::NestedBraces);
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::UnclosedBrace);
                    }

                    let content: String = chars[start..end].iter().collect();
                    segments.push(Self::parse_slot(&content)?);
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => return Err(TemplateError::UnmatchedClose),
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    fn parse_slot(content: &str) -> Result<Segment, TemplateError> {
        if content.is_empty() {
            return Err(TemplateError::EmptyBraces);
        }

        let (key, default) = match content.split_once('|') {
            Some((key, default)) => (key.trim(), Some(default.to_string())),
            None => (content.trim(), None),
        };

        if key.is_empty() {
            return Err(TemplateError::EmptyBraces);
        }
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(TemplateError::InvalidKey(key.to_string()));
        }

        Ok(Segment::Slot {
            key: key.to_string(),
            default,
        })
    }

    /// Keys referenced by slots, in template order (duplicates kept).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot { key, .. } => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Interpolate `answers` into the template.
    ///
    /// A slot resolves to the recorded answer, then its inline default,
    /// then `fallback`.
    pub fn render(&self, answers: &AnswerMap, fallback: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot { key, default } => {
                    let value = answers
                        .get(key)
                        .or(default.as_deref())
                        .unwrap_or(fallback);
                    out.push_str(value);
                }
            }
        }
        out
    }
}

impl std::str::FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}
