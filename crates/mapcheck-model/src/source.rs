//! Fields extracted from the selected document node.

use serde::Serialize;
use std::fmt;

/// Classification of a source value as found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Null,
    Array,
    Object,
    /// String carried by an XML attribute rather than an element.
    AttributeString,
}

impl ValueKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
            Self::AttributeString => "attribute",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Element-side data the compatibility checker needs beyond the text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlValue {
    /// Concatenated trimmed text content.
    pub text: String,
    /// `xsi:nil="true"` was present on the element.
    pub nil: bool,
    /// The element has child elements.
    pub has_children: bool,
    /// Number of sibling elements sharing this local name (>= 1).
    pub repeat_count: usize,
}

/// Opaque handle into the parsed source document.
#[derive(Debug, Clone)]
pub enum SourceValue {
    Json(serde_json::Value),
    XmlElement(XmlValue),
    XmlAttribute(String),
}

/// One field extracted from the selected document node.
#[derive(Debug, Clone)]
pub struct SourceField {
    /// Field name with its original casing.
    pub name: String,
    pub kind: ValueKind,
    pub value: SourceValue,
    /// Truncated display form of the value.
    pub preview: String,
}

/// Maximum length of a value preview before truncation.
const PREVIEW_MAX: usize = 100;

/// Truncate a display value to at most 100 characters, appending `...`
/// when cut.
#[must_use]
pub fn preview(raw: &str) -> String {
    if raw.chars().count() <= PREVIEW_MAX {
        return raw.to_string();
    }
    let truncated: String = raw.chars().take(PREVIEW_MAX).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_pass_through() {
        assert_eq!(preview("hello"), "hello");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn long_values_truncate_with_suffix() {
        let long = "x".repeat(150);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn boundary_is_exact() {
        let exact = "y".repeat(100);
        assert_eq!(preview(&exact), exact);
    }
}
