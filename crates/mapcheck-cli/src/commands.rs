//! Command implementations.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use mapcheck_model::EntityMappingResult;
use mapcheck_shape::parse_target_shape;
use mapcheck_validate::{DocumentFormat, validate_document};

use crate::cli::{CheckArgs, FormatArg, ShapeArgs};

pub fn run_check(args: &CheckArgs) -> Result<EntityMappingResult> {
    let document = fs::read_to_string(&args.document)
        .with_context(|| format!("reading document {}", args.document.display()))?;
    let shape_text = fs::read_to_string(&args.shape)
        .with_context(|| format!("reading shape {}", args.shape.display()))?;

    let shape = parse_target_shape(&shape_text);
    info!(fields = shape.len(), "parsed target shape");

    let format = resolve_format(args.format, &document);
    Ok(validate_document(
        &document,
        format,
        &shape,
        args.collection,
    ))
}

pub fn run_shape(args: &ShapeArgs) -> Result<()> {
    let shape_text = fs::read_to_string(&args.shape)
        .with_context(|| format!("reading shape {}", args.shape.display()))?;
    let shape = parse_target_shape(&shape_text);
    if shape.is_empty() {
        println!("no property declarations found");
        return Ok(());
    }
    for field in &shape {
        println!("{}\t{}", field.name, field.type_text);
    }
    Ok(())
}

fn resolve_format(arg: FormatArg, document: &str) -> DocumentFormat {
    match arg {
        FormatArg::Json => DocumentFormat::Json,
        FormatArg::Xml => DocumentFormat::Xml,
        FormatArg::Auto => {
            if document.trim_start().starts_with('<') {
                DocumentFormat::Xml
            } else {
                DocumentFormat::Json
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_format_sniffs_xml() {
        assert_eq!(
            resolve_format(FormatArg::Auto, "  <Root/>"),
            DocumentFormat::Xml
        );
        assert_eq!(
            resolve_format(FormatArg::Auto, "{\"a\": 1}"),
            DocumentFormat::Json
        );
    }
}
