//! Mapping validation orchestrator.

use tracing::debug;

use mapcheck_ingest::{ExtractedFields, extract_json, extract_xml};
use mapcheck_model::{
    BaseType, EntityMappingResult, FieldMappingResult, SourceField, SourceValue, TargetField,
    TypeDescriptor,
};

use crate::checker::check;
use crate::fuzzy::suggest;

/// Source document format accepted by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Xml,
}

/// Validate a document against the target shape.
///
/// Pure and synchronous: the result is a function of the three inputs, all
/// failures are returned as data, and every declared field produces exactly
/// one [`FieldMappingResult`] unless a document-level error aborts first.
#[must_use]
pub fn validate_document(
    text: &str,
    format: DocumentFormat,
    shape: &[TargetField],
    collection_mode: bool,
) -> EntityMappingResult {
    if shape.is_empty() {
        return EntityMappingResult::document_error("no fields declared in the target shape");
    }
    let extracted = match format {
        DocumentFormat::Json => extract_json(text, collection_mode),
        DocumentFormat::Xml => extract_xml(text, collection_mode),
    };
    let extracted = match extracted {
        Ok(fields) => fields,
        Err(error) => return EntityMappingResult::document_error(error.to_string()),
    };
    debug!(
        declared = shape.len(),
        available = extracted.names().len(),
        "validating target shape against extracted fields"
    );

    let results = shape
        .iter()
        .map(|target| validate_field(target, &extracted, format))
        .collect();
    EntityMappingResult::from_fields(results)
}

fn validate_field(
    target: &TargetField,
    extracted: &ExtractedFields,
    format: DocumentFormat,
) -> FieldMappingResult {
    let descriptor = TypeDescriptor::resolve(&target.type_text);
    let Some(field) = lookup_field(target, descriptor, extracted, format) else {
        let reason = match suggest(&target.name, extracted.names()) {
            Some(candidate) => format!(
                "field '{}' not found in source (did you mean '{candidate}'?)",
                target.name
            ),
            None => format!("field '{}' not found in source", target.name),
        };
        return FieldMappingResult::unmatched(&target.name, &target.type_text, reason);
    };

    let outcome = check(descriptor, &target.type_text, field);
    let preview = collection_preview(descriptor, field, outcome.ok)
        .unwrap_or_else(|| field.preview.clone());
    FieldMappingResult::matched(
        &target.name,
        &target.type_text,
        &field.name,
        field.kind,
        preview,
        outcome.ok,
        outcome.reason,
    )
}

/// Repeated XML elements matched as a collection report their count instead
/// of the first element's text.
fn collection_preview(
    descriptor: TypeDescriptor,
    field: &SourceField,
    ok: bool,
) -> Option<String> {
    if !ok || descriptor.base != BaseType::Collection {
        return None;
    }
    match &field.value {
        SourceValue::XmlElement(value) => Some(format!("{} element(s)", value.repeat_count)),
        _ => None,
    }
}

fn lookup_field<'a>(
    target: &TargetField,
    descriptor: TypeDescriptor,
    extracted: &'a ExtractedFields,
    format: DocumentFormat,
) -> Option<&'a SourceField> {
    if descriptor.base == BaseType::Collection && format == DocumentFormat::Xml {
        // repeated elements often carry the singular form of the declared
        // name: Items -> <Item>...<Item>
        if let Some(field) = extracted.lookup_element(&target.name) {
            return Some(field);
        }
        if let Some(singular) = singular_name(&target.name)
            && let Some(field) = extracted.lookup_element(singular)
        {
            return Some(field);
        }
        return extracted.lookup(&target.name);
    }
    extracted.lookup(&target.name)
}

fn singular_name(name: &str) -> Option<&str> {
    let stripped = name
        .strip_suffix('s')
        .or_else(|| name.strip_suffix('S'))?;
    (!stripped.is_empty()).then_some(stripped)
}
