//! Document field extraction.
//!
//! Both extractors produce the same output contract: a case-insensitive map
//! of field name to [`SourceField`] plus an ordered list of distinct
//! available names, built from the single selected document node (the root
//! object, or the first element when collection mode is requested).

pub mod error;
pub mod json;
pub mod xml;

pub use error::ExtractError;
pub use json::extract_json;
pub use xml::extract_xml;

use mapcheck_model::{CaseInsensitiveMap, SourceField};

/// Fields extracted from the selected document node.
///
/// Element names are unique under case-insensitive comparison. Attributes
/// (XML only) live in a secondary map consulted only when no element of
/// that name exists; they never shadow elements.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    elements: CaseInsensitiveMap<SourceField>,
    attributes: CaseInsensitiveMap<SourceField>,
    names: Vec<String>,
}

impl ExtractedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push_name(&mut self, name: &str) {
        if !self.names.iter().any(|known| known.eq_ignore_ascii_case(name)) {
            self.names.push(name.to_string());
        }
    }

    /// Insert an element field, replacing any case-variant duplicate
    /// (JSON policy).
    pub fn insert_element_last_wins(&mut self, field: SourceField) {
        self.push_name(&field.name);
        let name = field.name.clone();
        self.elements.insert_last_wins(&name, field);
    }

    /// Insert an element field, keeping the first case-variant occurrence
    /// (XML policy).
    pub fn insert_element_first_wins(&mut self, field: SourceField) {
        self.push_name(&field.name);
        let name = field.name.clone();
        self.elements.insert_first_wins(&name, field);
    }

    /// Insert an attribute field into the fallback map.
    pub fn insert_attribute(&mut self, field: SourceField) {
        self.push_name(&field.name);
        let name = field.name.clone();
        self.attributes.insert_first_wins(&name, field);
    }

    /// Case-insensitive lookup: elements first, attributes as fallback.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SourceField> {
        self.elements
            .get(name)
            .or_else(|| self.attributes.get(name))
    }

    /// Case-insensitive lookup restricted to elements.
    #[must_use]
    pub fn lookup_element(&self, name: &str) -> Option<&SourceField> {
        self.elements.get(name)
    }

    /// Distinct available names, in document order (elements before
    /// attributes).
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.attributes.is_empty()
    }
}
