//! JSON field extraction with lenient pre-normalization.
//!
//! Real-world input is often hand-edited: single-quoted strings, comments,
//! trailing commas. A quote-mode state machine rewrites such documents into
//! standard JSON before parsing. Documents that already look standard (cheap
//! prefix heuristic) are passed to the parser untouched.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use mapcheck_model::{SourceField, SourceValue, ValueKind, preview};

use crate::ExtractedFields;
use crate::error::ExtractError;

/// Extract fields from a JSON document.
///
/// In collection mode the root must be a non-empty array and the first
/// element (an object) is the node fields are taken from; otherwise the
/// root itself must be an object. Duplicate case-variant keys: last wins.
pub fn extract_json(text: &str, collection_mode: bool) -> Result<ExtractedFields, ExtractError> {
    let normalized = normalize_lenient(text);
    if matches!(normalized, Cow::Owned(_)) {
        debug!("applied lenient JSON normalization");
    }
    let root: Value = serde_json::from_str(&normalized)?;
    let node = select_node(&root, collection_mode)?;

    let mut fields = ExtractedFields::new();
    for (name, value) in node {
        fields.insert_element_last_wins(SourceField {
            name: name.clone(),
            kind: json_kind(value),
            preview: preview(&display_value(value)),
            value: SourceValue::Json(value.clone()),
        });
    }
    Ok(fields)
}

fn select_node(
    root: &Value,
    collection_mode: bool,
) -> Result<&serde_json::Map<String, Value>, ExtractError> {
    if collection_mode {
        let Value::Array(items) = root else {
            return Err(ExtractError::RootNotArray(kind_name(root)));
        };
        let first = items.first().ok_or(ExtractError::EmptyCollection)?;
        match first {
            Value::Object(map) => Ok(map),
            other => Err(ExtractError::ElementNotObject(kind_name(other))),
        }
    } else {
        match root {
            Value::Object(map) => Ok(map),
            other => Err(ExtractError::RootNotObject(kind_name(other))),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn json_kind(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Bool,
        Value::Number(_) => ValueKind::Number,
        Value::String(_) => ValueKind::String,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Cheap heuristic: text that starts like standard JSON skips normalization.
fn looks_standard(text: &str) -> bool {
    let trimmed = text.trim_start();
    if ["{\"", "[\"", "[{", "[["]
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return true;
    }
    if ["true", "false", "null"]
        .iter()
        .any(|literal| trimmed.starts_with(literal))
    {
        return true;
    }
    matches!(trimmed.as_bytes().first(), Some(b'-' | b'0'..=b'9'))
}

#[derive(PartialEq)]
enum QuoteMode {
    Outside,
    Single,
    Double,
}

/// Rewrite single-quoted strings to double-quoted, strip `//` and `/* */`
/// comments, and drop trailing commas. Escaped characters inside strings
/// pass through verbatim.
///
/// Runs in two quote-aware passes so a comment sitting between a trailing
/// comma and its closing bracket does not hide the comma.
fn normalize_lenient(text: &str) -> Cow<'_, str> {
    if looks_standard(text) {
        return Cow::Borrowed(text);
    }
    let stripped = strip_comments(text);
    Cow::Owned(rewrite_quotes_and_commas(&stripped))
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut mode = QuoteMode::Outside;
    while let Some(c) = chars.next() {
        match mode {
            QuoteMode::Outside => match c {
                '\'' => {
                    out.push(c);
                    mode = QuoteMode::Single;
                }
                '"' => {
                    out.push(c);
                    mode = QuoteMode::Double;
                }
                '/' => match chars.peek() {
                    Some('/') => {
                        while let Some(&next) = chars.peek() {
                            if next == '\n' {
                                break;
                            }
                            chars.next();
                        }
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = '\0';
                        for next in chars.by_ref() {
                            if prev == '*' && next == '/' {
                                break;
                            }
                            prev = next;
                        }
                    }
                    _ => out.push('/'),
                },
                _ => out.push(c),
            },
            QuoteMode::Single | QuoteMode::Double => {
                out.push(c);
                match c {
                    '\\' => {
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    }
                    '\'' if mode == QuoteMode::Single => mode = QuoteMode::Outside,
                    '"' if mode == QuoteMode::Double => mode = QuoteMode::Outside,
                    _ => {}
                }
            }
        }
    }
    out
}

fn rewrite_quotes_and_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut mode = QuoteMode::Outside;
    while let Some(c) = chars.next() {
        match mode {
            QuoteMode::Outside => match c {
                '\'' => {
                    out.push('"');
                    mode = QuoteMode::Single;
                }
                '"' => {
                    out.push('"');
                    mode = QuoteMode::Double;
                }
                ',' => {
                    let mut whitespace = String::new();
                    while let Some(&next) = chars.peek() {
                        if !next.is_whitespace() {
                            break;
                        }
                        whitespace.push(next);
                        chars.next();
                    }
                    if !matches!(chars.peek(), Some('}' | ']')) {
                        out.push(',');
                    }
                    out.push_str(&whitespace);
                }
                _ => out.push(c),
            },
            QuoteMode::Single => match c {
                '\\' => {
                    out.push('\\');
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '\'' => {
                    out.push('"');
                    mode = QuoteMode::Outside;
                }
                '"' => out.push_str("\\\""),
                _ => out.push(c),
            },
            QuoteMode::Double => match c {
                '\\' => {
                    out.push('\\');
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => {
                    out.push('"');
                    mode = QuoteMode::Outside;
                }
                _ => out.push(c),
            },
        }
    }
    out
}
