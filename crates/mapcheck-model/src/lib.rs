pub mod descriptor;
pub mod lookup;
pub mod result;
pub mod source;
pub mod target;

pub use descriptor::{BaseType, TypeDescriptor};
pub use lookup::CaseInsensitiveMap;
pub use result::{EntityMappingResult, FieldMappingResult};
pub use source::{SourceField, SourceValue, ValueKind, XmlValue, preview};
pub use target::TargetField;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_result_counts() {
        let fields = vec![
            FieldMappingResult::matched("Id", "int", "id", ValueKind::Number, "1", true, None),
            FieldMappingResult::matched(
                "Name",
                "string",
                "name",
                ValueKind::Number,
                "2",
                false,
                Some("expected string, got number".to_string()),
            ),
        ];
        let result = EntityMappingResult::from_fields(fields);
        assert!(!result.success);
        assert_eq!(result.total_fields, 2);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failed_count, 1);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn result_serializes() {
        let result = EntityMappingResult::document_error("malformed document");
        let json = serde_json::to_string(&result).expect("serialize result");
        assert!(json.contains("malformed document"));
        assert!(json.contains("\"success\":false"));
    }
}
