//! Classification of declared property types.
//!
//! A raw type descriptor string such as `int?`, `Nullable<decimal>` or
//! `List<string>` is resolved into a [`BaseType`] plus a nullability flag.
//! Resolution never fails: unrecognized type names degrade to
//! [`BaseType::Object`], which is treated permissively by the compatibility
//! checker so an unfamiliar custom type never blocks validation on its own.

use serde::Serialize;
use std::fmt;

/// Base type of a declared property after nullability stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseType {
    String,
    Bool,
    Integer,
    Float,
    DateTime,
    Guid,
    Collection,
    /// Unknown or custom type. Always compatible when a value is present.
    Object,
}

impl BaseType {
    /// Types that accept a null or empty source value regardless of the
    /// declared nullability marker.
    #[must_use]
    pub fn inherently_nullable(self) -> bool {
        matches!(self, Self::String | Self::Object | Self::Collection)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::Collection => "collection",
            Self::Object => "object",
        };
        f.write_str(label)
    }
}

/// Resolved form of a raw type descriptor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub nullable: bool,
}

impl TypeDescriptor {
    /// Resolve a raw type descriptor string.
    ///
    /// Strips a trailing `?` marker or a `Nullable<X>` wrapper, then
    /// classifies the remaining token. Collection syntax is checked before
    /// the scalar aliases so `int[]` resolves as a collection, not an
    /// integer.
    #[must_use]
    pub fn resolve(type_text: &str) -> Self {
        let (body, nullable) = strip_nullable(type_text.trim());
        Self {
            base: classify(body),
            nullable,
        }
    }
}

const NULLABLE_WRAPPER: &str = "Nullable<";

fn strip_nullable(text: &str) -> (&str, bool) {
    if let Some(body) = text.strip_suffix('?') {
        return (body.trim_end(), true);
    }
    if let Some(prefix) = text.get(..NULLABLE_WRAPPER.len())
        && prefix.eq_ignore_ascii_case(NULLABLE_WRAPPER)
        && text.len() > NULLABLE_WRAPPER.len() + 1
        && text.ends_with('>')
    {
        let inner = &text[NULLABLE_WRAPPER.len()..text.len() - 1];
        return (inner.trim(), true);
    }
    (text, false)
}

/// Generic list wrappers recognized as collections, matched by prefix.
const LIST_WRAPPERS: &[&str] = &[
    "list<",
    "ilist<",
    "ienumerable<",
    "icollection<",
    "ireadonlylist<",
    "ireadonlycollection<",
];

fn is_collection(lower: &str) -> bool {
    lower.ends_with("[]") || LIST_WRAPPERS.iter().any(|wrapper| lower.starts_with(wrapper))
}

fn classify(text: &str) -> BaseType {
    let lower = text.to_ascii_lowercase();
    if is_collection(&lower) {
        return BaseType::Collection;
    }
    match lower.as_str() {
        "string" => BaseType::String,
        "bool" | "boolean" => BaseType::Bool,
        "sbyte" | "byte" | "short" | "ushort" | "int" | "uint" | "long" | "ulong" | "int16"
        | "uint16" | "int32" | "uint32" | "int64" | "uint64" => BaseType::Integer,
        "float" | "double" | "decimal" | "single" => BaseType::Float,
        "datetime" | "datetimeoffset" => BaseType::DateTime,
        "guid" => BaseType::Guid,
        _ => BaseType::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> (BaseType, bool) {
        let descriptor = TypeDescriptor::resolve(text);
        (descriptor.base, descriptor.nullable)
    }

    #[test]
    fn scalar_aliases() {
        assert_eq!(resolve("string"), (BaseType::String, false));
        assert_eq!(resolve("bool"), (BaseType::Bool, false));
        assert_eq!(resolve("Boolean"), (BaseType::Bool, false));
        assert_eq!(resolve("int"), (BaseType::Integer, false));
        assert_eq!(resolve("Int64"), (BaseType::Integer, false));
        assert_eq!(resolve("ushort"), (BaseType::Integer, false));
        assert_eq!(resolve("decimal"), (BaseType::Float, false));
        assert_eq!(resolve("Double"), (BaseType::Float, false));
        assert_eq!(resolve("DateTime"), (BaseType::DateTime, false));
        assert_eq!(resolve("DateTimeOffset"), (BaseType::DateTime, false));
        assert_eq!(resolve("Guid"), (BaseType::Guid, false));
    }

    #[test]
    fn nullable_markers() {
        assert_eq!(resolve("int?"), (BaseType::Integer, true));
        assert_eq!(resolve("Nullable<int>"), (BaseType::Integer, true));
        assert_eq!(resolve("nullable<DateTime>"), (BaseType::DateTime, true));
        assert_eq!(resolve("Guid?"), (BaseType::Guid, true));
    }

    #[test]
    fn collections() {
        assert_eq!(resolve("int[]"), (BaseType::Collection, false));
        assert_eq!(resolve("List<string>"), (BaseType::Collection, false));
        assert_eq!(resolve("IEnumerable<int>"), (BaseType::Collection, false));
        assert_eq!(resolve("ireadonlylist<Foo>"), (BaseType::Collection, false));
        assert_eq!(resolve("List<string>?"), (BaseType::Collection, true));
    }

    #[test]
    fn unknown_types_degrade_to_object() {
        // Permissive fallback: unfamiliar type names must never fail
        // resolution on their own.
        assert_eq!(resolve("CustomerAddress"), (BaseType::Object, false));
        assert_eq!(resolve("Dictionary<string, int>"), (BaseType::Object, false));
        assert_eq!(resolve(""), (BaseType::Object, false));
    }

    #[test]
    fn inherently_nullable_bases() {
        assert!(BaseType::String.inherently_nullable());
        assert!(BaseType::Object.inherently_nullable());
        assert!(BaseType::Collection.inherently_nullable());
        assert!(!BaseType::Integer.inherently_nullable());
        assert!(!BaseType::DateTime.inherently_nullable());
    }
}
