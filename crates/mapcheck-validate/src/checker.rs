//! Type compatibility rules for matched source values.
//!
//! The null tier runs first: an explicitly null, nil, or empty value is
//! judged purely on nullability. Only present values reach the per-type
//! decision table. Unknown custom types always pass when a value is
//! present.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use uuid::Uuid;

use mapcheck_model::{BaseType, SourceField, SourceValue, TypeDescriptor};

/// Outcome of checking one matched value against a declared type.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub ok: bool,
    pub reason: Option<String>,
}

impl FieldCheck {
    fn pass() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

/// Check a present source value against the resolved target type.
///
/// `type_text` is the raw declared type, used verbatim in failure reasons.
#[must_use]
pub fn check(descriptor: TypeDescriptor, type_text: &str, field: &SourceField) -> FieldCheck {
    if let Some(cause) = null_cause(field) {
        return check_null(descriptor, type_text, cause);
    }
    match descriptor.base {
        BaseType::String => check_string(field),
        BaseType::Bool => check_bool(field),
        BaseType::Integer => check_integer(type_text, field),
        BaseType::Float => check_float(type_text, field),
        BaseType::DateTime => check_parsed_text(type_text, "DateTime", field, parses_as_datetime),
        BaseType::Guid => check_parsed_text(type_text, "Guid", field, parses_as_guid),
        BaseType::Collection => check_collection(type_text, field),
        BaseType::Object => FieldCheck::pass(),
    }
}

enum NullCause {
    ExplicitNull,
    XsiNil,
    Empty,
}

impl NullCause {
    fn describe(&self) -> &'static str {
        match self {
            Self::ExplicitNull => "value is explicit null",
            Self::XsiNil => "element has xsi:nil",
            Self::Empty => "value is empty",
        }
    }
}

fn null_cause(field: &SourceField) -> Option<NullCause> {
    match &field.value {
        SourceValue::Json(Value::Null) => Some(NullCause::ExplicitNull),
        SourceValue::Json(_) => None,
        SourceValue::XmlElement(value) => {
            if value.nil {
                Some(NullCause::XsiNil)
            } else if !value.has_children && value.text.is_empty() {
                Some(NullCause::Empty)
            } else {
                None
            }
        }
        SourceValue::XmlAttribute(text) => text.is_empty().then_some(NullCause::Empty),
    }
}

fn check_null(descriptor: TypeDescriptor, type_text: &str, cause: NullCause) -> FieldCheck {
    // String, Object and Collection absorb null/empty regardless of the
    // declared marker; this includes the empty string-typed XML element.
    if descriptor.nullable || descriptor.base.inherently_nullable() {
        return FieldCheck::pass();
    }
    FieldCheck::fail(format!(
        "{type_text} is not nullable ({})",
        cause.describe()
    ))
}

fn check_string(field: &SourceField) -> FieldCheck {
    match &field.value {
        SourceValue::Json(Value::String(_)) => FieldCheck::pass(),
        SourceValue::Json(_) => FieldCheck::fail(format!("expected string, got {}", field.kind)),
        // any non-null, non-missing XML text counts as a string
        SourceValue::XmlElement(value) if value.has_children => {
            FieldCheck::fail("expected string, got object")
        }
        SourceValue::XmlElement(_) | SourceValue::XmlAttribute(_) => FieldCheck::pass(),
    }
}

fn check_bool(field: &SourceField) -> FieldCheck {
    match &field.value {
        SourceValue::Json(Value::Bool(_)) => FieldCheck::pass(),
        SourceValue::Json(_) => FieldCheck::fail(format!("expected bool, got {}", field.kind)),
        SourceValue::XmlElement(_) | SourceValue::XmlAttribute(_) => {
            let text = xml_text(field).trim().to_ascii_lowercase();
            if matches!(text.as_str(), "true" | "false" | "0" | "1") {
                FieldCheck::pass()
            } else {
                FieldCheck::fail(format!("expected bool, got '{}'", xml_text(field).trim()))
            }
        }
    }
}

fn check_integer(type_text: &str, field: &SourceField) -> FieldCheck {
    match &field.value {
        SourceValue::Json(Value::Number(number)) => {
            // the raw token decides: "42.0" carries a decimal point even
            // though its value is integral, "1e3" does not
            let raw = number.to_string();
            if number.is_i64() || number.is_u64() {
                FieldCheck::pass()
            } else if raw.contains('.') {
                FieldCheck::fail(format!("expected {type_text}, got {raw} (has decimal)"))
            } else if number.as_f64().is_some_and(|n| n.fract() == 0.0) {
                FieldCheck::pass()
            } else {
                FieldCheck::fail(format!("expected {type_text}, got {raw}"))
            }
        }
        SourceValue::Json(_) => {
            FieldCheck::fail(format!("expected {type_text}, got {}", field.kind))
        }
        SourceValue::XmlElement(_) | SourceValue::XmlAttribute(_) => {
            let text = xml_text(field).trim().to_string();
            if text.parse::<i64>().is_ok() {
                FieldCheck::pass()
            } else if text.parse::<f64>().is_ok() && text.contains('.') {
                FieldCheck::fail(format!("expected {type_text}, got {text} (has decimal)"))
            } else {
                FieldCheck::fail(format!("expected {type_text}, got '{text}'"))
            }
        }
    }
}

fn check_float(type_text: &str, field: &SourceField) -> FieldCheck {
    match &field.value {
        SourceValue::Json(Value::Number(_)) => FieldCheck::pass(),
        SourceValue::Json(_) => {
            FieldCheck::fail(format!("expected {type_text}, got {}", field.kind))
        }
        SourceValue::XmlElement(_) | SourceValue::XmlAttribute(_) => {
            let text = xml_text(field).trim();
            if text.parse::<f64>().is_ok() {
                FieldCheck::pass()
            } else {
                FieldCheck::fail(format!("expected {type_text}, got '{text}'"))
            }
        }
    }
}

fn check_parsed_text(
    type_text: &str,
    type_label: &str,
    field: &SourceField,
    parses: fn(&str) -> bool,
) -> FieldCheck {
    let text = match &field.value {
        SourceValue::Json(Value::String(text)) => text.as_str(),
        SourceValue::Json(_) => {
            return FieldCheck::fail(format!(
                "expected {type_text} string, got {}",
                field.kind
            ));
        }
        SourceValue::XmlElement(value) => value.text.as_str(),
        SourceValue::XmlAttribute(text) => text.as_str(),
    };
    if parses(text) {
        FieldCheck::pass()
    } else {
        FieldCheck::fail(format!("invalid {type_label} format: {text}"))
    }
}

fn check_collection(type_text: &str, field: &SourceField) -> FieldCheck {
    match &field.value {
        SourceValue::Json(Value::Array(_)) => FieldCheck::pass(),
        SourceValue::Json(_) => FieldCheck::fail(format!(
            "expected array for {type_text}, got {}",
            field.kind
        )),
        // a matched element satisfies a collection: either siblings repeat
        // its name or it wraps child elements
        SourceValue::XmlElement(_) => FieldCheck::pass(),
        SourceValue::XmlAttribute(_) => FieldCheck::fail(format!(
            "expected array for {type_text}, got attribute"
        )),
    }
}

fn xml_text(field: &SourceField) -> &str {
    match &field.value {
        SourceValue::XmlElement(value) => &value.text,
        SourceValue::XmlAttribute(text) => text,
        SourceValue::Json(_) => "",
    }
}

/// Lenient date/time validation: RFC 3339 plus common layouts.
fn parses_as_datetime(text: &str) -> bool {
    let text = text.trim();
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    if DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
    {
        return true;
    }
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
}

fn parses_as_guid(text: &str) -> bool {
    Uuid::parse_str(text.trim()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapcheck_model::{ValueKind, XmlValue, preview};

    fn json_field(value: Value) -> SourceField {
        let kind = match &value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        };
        SourceField {
            name: "field".to_string(),
            kind,
            preview: preview(&value.to_string()),
            value: SourceValue::Json(value),
        }
    }

    fn xml_field(text: &str) -> SourceField {
        SourceField {
            name: "field".to_string(),
            kind: ValueKind::String,
            preview: preview(text),
            value: SourceValue::XmlElement(XmlValue {
                text: text.to_string(),
                nil: false,
                has_children: false,
                repeat_count: 1,
            }),
        }
    }

    fn descriptor(base: BaseType, nullable: bool) -> TypeDescriptor {
        TypeDescriptor { base, nullable }
    }

    #[test]
    fn integer_accepts_whole_numbers() {
        let outcome = check(
            descriptor(BaseType::Integer, false),
            "int",
            &json_field(serde_json::json!(42)),
        );
        assert!(outcome.ok);
    }

    #[test]
    fn integer_rejects_decimal_representation() {
        let outcome = check(
            descriptor(BaseType::Integer, false),
            "int",
            &json_field(serde_json::json!(42.0)),
        );
        assert!(!outcome.ok);
        assert!(outcome.reason.expect("reason").contains("has decimal"));
    }

    #[test]
    fn integer_accepts_exponent_form_without_decimal_point() {
        let value: Value = serde_json::from_str("1e3").expect("number");
        let outcome = check(descriptor(BaseType::Integer, false), "int", &json_field(value));
        assert!(outcome.ok);
    }

    #[test]
    fn integer_failure_quotes_the_raw_token() {
        let value: Value = serde_json::from_str("1.5e0").expect("number");
        let outcome = check(descriptor(BaseType::Integer, false), "int", &json_field(value));
        assert_eq!(
            outcome.reason.as_deref(),
            Some("expected int, got 1.5e0 (has decimal)")
        );

        let value: Value = serde_json::from_str("15e-1").expect("number");
        let outcome = check(descriptor(BaseType::Integer, false), "int", &json_field(value));
        assert_eq!(outcome.reason.as_deref(), Some("expected int, got 15e-1"));
    }

    #[test]
    fn non_nullable_int_rejects_null() {
        let outcome = check(
            descriptor(BaseType::Integer, false),
            "int",
            &json_field(Value::Null),
        );
        assert!(!outcome.ok);
        assert!(outcome.reason.expect("reason").contains("not nullable"));
    }

    #[test]
    fn nullable_int_accepts_null() {
        let outcome = check(
            descriptor(BaseType::Integer, true),
            "int?",
            &json_field(Value::Null),
        );
        assert!(outcome.ok);
    }

    #[test]
    fn string_accepts_null_even_without_marker() {
        let outcome = check(
            descriptor(BaseType::String, false),
            "string",
            &json_field(Value::Null),
        );
        assert!(outcome.ok);
    }

    #[test]
    fn string_rejects_number() {
        let outcome = check(
            descriptor(BaseType::String, false),
            "string",
            &json_field(serde_json::json!(7)),
        );
        assert_eq!(
            outcome.reason.as_deref(),
            Some("expected string, got number")
        );
    }

    #[test]
    fn xml_bool_literals() {
        for text in ["true", "False", "0", "1"] {
            let outcome = check(descriptor(BaseType::Bool, false), "bool", &xml_field(text));
            assert!(outcome.ok, "{text}");
        }
        let outcome = check(descriptor(BaseType::Bool, false), "bool", &xml_field("yes"));
        assert!(!outcome.ok);
    }

    #[test]
    fn xml_empty_string_element_passes_without_nullable_marker() {
        // deliberate asymmetry: empty string-typed elements always pass
        let outcome = check(descriptor(BaseType::String, false), "string", &xml_field(""));
        assert!(outcome.ok);
    }

    #[test]
    fn xml_empty_int_element_requires_nullable() {
        let empty = xml_field("");
        assert!(!check(descriptor(BaseType::Integer, false), "int", &empty).ok);
        assert!(check(descriptor(BaseType::Integer, true), "int?", &empty).ok);
    }

    #[test]
    fn xml_nil_element_requires_nullable() {
        let field = SourceField {
            name: "field".to_string(),
            kind: ValueKind::Null,
            preview: String::new(),
            value: SourceValue::XmlElement(XmlValue {
                text: String::new(),
                nil: true,
                has_children: false,
                repeat_count: 1,
            }),
        };
        let outcome = check(descriptor(BaseType::DateTime, false), "DateTime", &field);
        assert!(!outcome.ok);
        assert!(outcome.reason.expect("reason").contains("xsi:nil"));
    }

    #[test]
    fn datetime_formats() {
        for text in [
            "2024-03-01T10:30:00Z",
            "2024-03-01T10:30:00",
            "2024-03-01 10:30:00.250",
            "2024-03-01",
            "03/01/2024",
        ] {
            let outcome = check(
                descriptor(BaseType::DateTime, false),
                "DateTime",
                &json_field(Value::String(text.to_string())),
            );
            assert!(outcome.ok, "{text}");
        }
        let outcome = check(
            descriptor(BaseType::DateTime, false),
            "DateTime",
            &json_field(Value::String("not a date".to_string())),
        );
        assert_eq!(
            outcome.reason.as_deref(),
            Some("invalid DateTime format: not a date")
        );
    }

    #[test]
    fn guid_requires_valid_uuid() {
        let ok = json_field(Value::String(
            "6f9619ff-8b86-d011-b42d-00c04fc964ff".to_string(),
        ));
        assert!(check(descriptor(BaseType::Guid, false), "Guid", &ok).ok);
        let bad = json_field(Value::String("not-a-guid".to_string()));
        let outcome = check(descriptor(BaseType::Guid, false), "Guid", &bad);
        assert_eq!(
            outcome.reason.as_deref(),
            Some("invalid Guid format: not-a-guid")
        );
    }

    #[test]
    fn collection_requires_json_array() {
        let ok = json_field(serde_json::json!(["a", "b"]));
        assert!(check(descriptor(BaseType::Collection, false), "List<string>", &ok).ok);
        let outcome = check(
            descriptor(BaseType::Collection, false),
            "List<string>",
            &json_field(serde_json::json!("a")),
        );
        assert_eq!(
            outcome.reason.as_deref(),
            Some("expected array for List<string>, got string")
        );
    }

    #[test]
    fn unknown_type_always_passes_when_present() {
        // permissive fallback: unrecognized type names never fail by themselves
        for value in [
            serde_json::json!("text"),
            serde_json::json!(1),
            serde_json::json!({"nested": true}),
            serde_json::json!([1, 2]),
        ] {
            let outcome = check(
                descriptor(BaseType::Object, false),
                "CustomerAddress",
                &json_field(value),
            );
            assert!(outcome.ok);
        }
    }
}
