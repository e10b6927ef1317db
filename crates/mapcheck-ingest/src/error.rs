use thiserror::Error;

/// Document-level extraction failures.
///
/// These abort a validation run before any per-field checking and are
/// surfaced to callers as data, never as panics.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid XML document: {0}")]
    InvalidXml(#[from] quick_xml::Error),
    #[error("invalid XML attribute: {0}")]
    InvalidAttribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("expected a JSON object at the document root, got {0}")]
    RootNotObject(&'static str),
    #[error("collection mode expects a JSON array at the document root, got {0}")]
    RootNotArray(&'static str),
    #[error("collection mode expects at least one element, the array is empty")]
    EmptyCollection,
    #[error("first array element is not an object, got {0}")]
    ElementNotObject(&'static str),
    #[error("collection mode expects the XML root to have child elements")]
    NoChildElements,
    #[error("document has no root element")]
    MissingRoot,
}
