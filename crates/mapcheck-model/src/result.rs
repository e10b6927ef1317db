//! Per-field and aggregate mapping results.

use serde::Serialize;

use crate::source::ValueKind;

/// Outcome for one declared field. Created exactly once per target field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldMappingResult {
    pub property_name: String,
    pub property_type: String,
    pub matched_source_name: Option<String>,
    pub source_kind: Option<ValueKind>,
    pub source_preview: Option<String>,
    pub success: bool,
    pub reason: Option<String>,
}

impl FieldMappingResult {
    /// Result for a field that matched a source value.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn matched(
        property_name: impl Into<String>,
        property_type: impl Into<String>,
        source_name: impl Into<String>,
        source_kind: ValueKind,
        source_preview: impl Into<String>,
        success: bool,
        reason: Option<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            property_type: property_type.into(),
            matched_source_name: Some(source_name.into()),
            source_kind: Some(source_kind),
            source_preview: Some(source_preview.into()),
            success,
            reason,
        }
    }

    /// Result for a field with no matching source name.
    #[must_use]
    pub fn unmatched(
        property_name: impl Into<String>,
        property_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            property_type: property_type.into(),
            matched_source_name: None,
            source_kind: None,
            source_preview: None,
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregate validation report for one document against one shape.
///
/// Constructed fresh per call and fully populated before return; a pure
/// function of its inputs.
#[derive(Debug, Clone, Serialize)]
pub struct EntityMappingResult {
    pub success: bool,
    pub total_fields: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// Set only on a document-level failure that aborts before per-field
    /// validation.
    pub error_message: Option<String>,
    pub fields: Vec<FieldMappingResult>,
}

impl EntityMappingResult {
    /// Report for a document-level failure. No per-field results.
    #[must_use]
    pub fn document_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            total_fields: 0,
            success_count: 0,
            failed_count: 0,
            error_message: Some(message.into()),
            fields: Vec::new(),
        }
    }

    /// Aggregate per-field results. Success iff zero failures.
    #[must_use]
    pub fn from_fields(fields: Vec<FieldMappingResult>) -> Self {
        let total_fields = fields.len();
        let success_count = fields.iter().filter(|field| field.success).count();
        let failed_count = total_fields - success_count;
        Self {
            success: failed_count == 0,
            total_fields,
            success_count,
            failed_count,
            error_message: None,
            fields,
        }
    }
}
