use serde::{Deserialize, Serialize};

/// A declared property of the target shape: name plus raw type descriptor.
///
/// Produced once per validation run by the shape scanner. Declaration order
/// is preserved and determines report ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    pub name: String,
    pub type_text: String,
}

impl TargetField {
    #[must_use]
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
        }
    }
}
