//! XML field extraction.
//!
//! The document is pulled through quick-xml's event reader into a small
//! owned element tree, then the selected node's children become the primary
//! field map (first occurrence wins on duplicate local names) and its
//! attributes a secondary fallback map. `xsi:nil="true"` marks an element
//! as null for nullability checks.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use mapcheck_model::{SourceField, SourceValue, ValueKind, XmlValue, preview};

use crate::ExtractedFields;
use crate::error::ExtractError;

/// A parsed XML element with local names only.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
    pub nil: bool,
}

/// Extract fields from an XML document.
///
/// In collection mode the root's first child element becomes the node;
/// otherwise the root itself is the node.
pub fn extract_xml(text: &str, collection_mode: bool) -> Result<ExtractedFields, ExtractError> {
    let root = parse_document(text)?;
    let node = if collection_mode {
        root.children.first().ok_or(ExtractError::NoChildElements)?
    } else {
        &root
    };
    debug!(node = %node.name, children = node.children.len(), "selected XML node");

    let mut fields = ExtractedFields::new();
    for child in &node.children {
        let repeat_count = node
            .children
            .iter()
            .filter(|sibling| sibling.name.eq_ignore_ascii_case(&child.name))
            .count();
        let has_children = !child.children.is_empty();
        let kind = if child.nil {
            ValueKind::Null
        } else if has_children {
            ValueKind::Object
        } else {
            ValueKind::String
        };
        let display = if has_children {
            format!("({} child elements)", child.children.len())
        } else {
            child.text.clone()
        };
        fields.insert_element_first_wins(SourceField {
            name: child.name.clone(),
            kind,
            preview: preview(&display),
            value: SourceValue::XmlElement(XmlValue {
                text: child.text.clone(),
                nil: child.nil,
                has_children,
                repeat_count,
            }),
        });
    }
    for (name, value) in &node.attributes {
        fields.insert_attribute(SourceField {
            name: name.clone(),
            kind: ValueKind::AttributeString,
            preview: preview(value),
            value: SourceValue::XmlAttribute(value.clone()),
        });
    }
    Ok(fields)
}

/// Parse a document into its root element.
pub fn parse_document(text: &str) -> Result<XmlElement, ExtractError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // quick-xml rejects mismatched end tags before we get here
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(bytes) => {
                if let Some(open) = stack.last_mut() {
                    let content = bytes.xml_content().map_err(quick_xml::Error::from)?;
                    append_text(open, content.trim());
                }
            }
            Event::CData(bytes) => {
                if let Some(open) = stack.last_mut() {
                    let content = String::from_utf8_lossy(&bytes);
                    append_text(open, &content);
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions
            _ => {}
        }
    }
    root.ok_or(ExtractError::MissingRoot)
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // keep the first root; anything after it is ignored
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn append_text(element: &mut XmlElement, content: &str) {
    if content.is_empty() {
        return;
    }
    if !element.text.is_empty() {
        element.text.push(' ');
    }
    element.text.push_str(content);
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, ExtractError> {
    let name = String::from_utf8_lossy(start.name().local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    let mut nil = false;
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        if key.eq_ignore_ascii_case("nil") && value.eq_ignore_ascii_case("true") {
            nil = true;
        }
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        nil,
        ..XmlElement::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_mode_extracts_child_elements() {
        let fields = extract_xml("<User><Id>1</Id><Name>Ada</Name></User>", false).expect("extract");
        assert_eq!(fields.names(), ["Id", "Name"]);
        let name = fields.lookup("NAME").expect("name field");
        assert_eq!(name.kind, ValueKind::String);
        assert_eq!(name.preview, "Ada");
    }

    #[test]
    fn duplicate_elements_first_wins_with_repeat_count() {
        let fields =
            extract_xml("<Root><Item>1</Item><Item>2</Item></Root>", false).expect("extract");
        let item = fields.lookup("item").expect("item field");
        assert_eq!(item.preview, "1");
        let SourceValue::XmlElement(value) = &item.value else {
            panic!("expected element value");
        };
        assert_eq!(value.repeat_count, 2);
        assert_eq!(fields.names(), ["Item"]);
    }

    #[test]
    fn attributes_are_fallback_only() {
        let fields = extract_xml(
            r#"<User Id="attr"><Id>element</Id></User>"#,
            false,
        )
        .expect("extract");
        let id = fields.lookup("id").expect("id field");
        assert_eq!(id.preview, "element");
        assert_eq!(id.kind, ValueKind::String);
    }

    #[test]
    fn attribute_lookup_when_no_element() {
        let fields = extract_xml(r#"<User role="admin"><Id>1</Id></User>"#, false).expect("extract");
        let role = fields.lookup("Role").expect("role field");
        assert_eq!(role.kind, ValueKind::AttributeString);
        assert_eq!(role.preview, "admin");
    }

    #[test]
    fn xsi_nil_marks_element_null() {
        let fields = extract_xml(
            r#"<User><Name xsi:nil="true"/><Id>1</Id></User>"#,
            false,
        )
        .expect("extract");
        let name = fields.lookup("name").expect("name field");
        assert_eq!(name.kind, ValueKind::Null);
        let SourceValue::XmlElement(value) = &name.value else {
            panic!("expected element value");
        };
        assert!(value.nil);
    }

    #[test]
    fn nested_elements_are_objects() {
        let fields = extract_xml(
            "<Order><Customer><Name>Ada</Name></Customer></Order>",
            false,
        )
        .expect("extract");
        let customer = fields.lookup("customer").expect("customer field");
        assert_eq!(customer.kind, ValueKind::Object);
    }

    #[test]
    fn collection_mode_selects_first_child() {
        let fields = extract_xml(
            "<Users><User><Id>1</Id></User><User><Id>2</Id></User></Users>",
            true,
        )
        .expect("extract");
        assert_eq!(fields.lookup("id").expect("id").preview, "1");
    }

    #[test]
    fn collection_mode_requires_children() {
        let error = extract_xml("<Users/>", true).expect_err("no children");
        assert!(matches!(error, ExtractError::NoChildElements));
    }

    #[test]
    fn malformed_document_is_a_document_error() {
        assert!(matches!(
            extract_xml("<User><Id>1</User>", false),
            Err(ExtractError::InvalidXml(_))
        ));
    }

    #[test]
    fn entity_references_are_unescaped() {
        let fields = extract_xml(
            "<User><Name>Ada &amp; Grace &lt;pioneers&gt;</Name></User>",
            false,
        )
        .expect("extract");
        let name = fields.lookup("name").expect("name field");
        assert_eq!(name.preview, "Ada & Grace <pioneers>");
    }

    #[test]
    fn namespace_prefixes_are_stripped() {
        let fields = extract_xml(
            r#"<ns:User xmlns:ns="urn:x"><ns:Id>1</ns:Id></ns:User>"#,
            false,
        )
        .expect("extract");
        assert_eq!(fields.lookup("Id").expect("id").preview, "1");
    }
}
