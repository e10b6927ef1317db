//! Structural mapping validation.
//!
//! Decides whether a JSON or XML document is structurally and
//! type-compatible with a target shape, producing a per-field diagnostic
//! report with fuzzy name suggestions for unmatched fields.

mod checker;
mod engine;
mod fuzzy;

pub use checker::{FieldCheck, check};
pub use engine::{DocumentFormat, validate_document};
pub use fuzzy::suggest;
