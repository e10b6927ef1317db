//! Target-shape extraction from class-like property declarations.
//!
//! Scans a text blob for auto-property declarations of the form
//! `public <type> <name> { get; set; }` and returns the declared fields in
//! source order. The scan is deliberately narrow: anything that does not
//! match the pattern is ignored, and an empty result is valid at this layer
//! (the validator turns it into a document-level error).

use std::sync::OnceLock;

use mapcheck_model::TargetField;
use regex::Regex;

static PROPERTY_RE: OnceLock<Regex> = OnceLock::new();

fn property_re() -> &'static Regex {
    PROPERTY_RE.get_or_init(|| {
        // type: identifier with optional namespace dots, one generic argument
        // list, array suffix and/or nullable marker; name: plain identifier.
        Regex::new(
            r"public\s+([A-Za-z_][A-Za-z0-9_.]*(?:<[^<>]*>)?(?:\[\])?\??)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{\s*get;\s*set;\s*\}",
        )
        .expect("property pattern compiles")
    })
}

/// Scan a class-like definition for public auto-properties, in source order.
#[must_use]
pub fn parse_target_shape(text: &str) -> Vec<TargetField> {
    property_re()
        .captures_iter(text)
        .map(|caps| TargetField::new(&caps[2], &caps[1]))
        .collect()
}
