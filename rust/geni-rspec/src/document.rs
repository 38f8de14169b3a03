//! A minimal element tree built on top of [`quick_xml`].
//!
//! RSpec documents are small, so we materialize the elements (names and
//! attributes only, text is dropped) and answer the handful of structural
//! queries stitching needs by walking the tree.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::RspecError;

/// Maximum element depth [`parse_document`] accepts, the root included.
///
/// Real RSpecs stay within a dozen levels. The tree is torn down
/// recursively, so the depth must stay bounded.
pub const MAX_DEPTH: usize = 256;

/// An XML element, keyed by local name (namespace prefixes are dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Local name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute with the given local name, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Direct child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children().filter(move |child| child.name == name)
    }

    /// All elements below this one, in document (pre-)order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();

        while let Some(element) = pending.pop() {
            found.push(element);
            pending.extend(element.children.iter().rev());
        }

        found
    }

    /// All elements below this one with the given local name.
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|element| element.name == name)
            .collect()
    }

    fn open(start: &BytesStart<'_>) -> Result<Self, RspecError> {
        let name = utf8(start.local_name().as_ref(), "?")?;
        let mut attributes = Vec::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| RspecError::Attribute {
                element: name.clone(),
                message: error.to_string(),
            })?;

            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }

            let key = utf8(attribute.key.local_name().as_ref(), &name)?;
            let value = attribute
                .unescape_value()
                .map_err(|error| RspecError::Attribute {
                    element: name.clone(),
                    message: format!("{key}: {error}"),
                })?
                .into_owned();

            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

fn utf8(bytes: &[u8], element: &str) -> Result<String, RspecError> {
    String::from_utf8(bytes.to_vec()).map_err(|error| RspecError::Attribute {
        element: element.to_owned(),
        message: format!("name is not UTF-8: {error}"),
    })
}

/// Parse a complete XML document and return its single root element.
pub fn parse_document(xml: &str) -> Result<Element, RspecError> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(RspecError::Xml {
                    position: reader.buffer_position(),
                    source,
                });
            }
        };

        match event {
            Event::Start(start) => {
                let element = Element::open(&start)?;
                if open.is_empty() && root.is_some() {
                    return Err(RspecError::MultipleRoots(element.name));
                }
                if open.len() == MAX_DEPTH {
                    return Err(RspecError::TooDeep { limit: MAX_DEPTH });
                }
                open.push(element);
            }
            Event::Empty(start) => {
                if open.len() == MAX_DEPTH {
                    return Err(RspecError::TooDeep { limit: MAX_DEPTH });
                }
                let element = Element::open(&start)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(end) => {
                let Some(element) = open.pop() else {
                    return Err(RspecError::UnexpectedClose(
                        String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
                    ));
                };
                attach(&mut open, &mut root, element)?;
            }
            Event::Text(text) if open.is_empty() => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(RspecError::StrayText {
                        position: reader.buffer_position(),
                    });
                }
            }
            Event::CData(_) if open.is_empty() => {
                return Err(RspecError::StrayText {
                    position: reader.buffer_position(),
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(RspecError::Unclosed(element.name.clone()));
    }

    root.ok_or(RspecError::MissingRoot)
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), RspecError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(RspecError::MultipleRoots(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_keeps_local_names_and_attributes() -> Result<()> {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <rspec xmlns="http://www.geni.net/resources/rspec/3" xmlns:s="urn:stitch">
              <s:stitching s:lastUpdateTime="now"><s:path id="a&amp;b"/></s:stitching>
            </rspec>"#,
        )?;

        assert_eq!(root.name(), "rspec");
        assert_eq!(root.attribute("xmlns"), None);
        assert_eq!(root.attribute("s"), None);

        let stitching = root.children_named("stitching").next().unwrap();
        assert_eq!(stitching.attribute("lastUpdateTime"), Some("now"));
        assert_eq!(
            stitching.descendants_named("path")[0].attribute("id"),
            Some("a&b")
        );
        Ok(())
    }

    #[test]
    fn it_walks_descendants_in_document_order() -> Result<()> {
        let root = parse_document("<a><b><c/><d/></b><e><f/></e></a>")?;
        let names: Vec<&str> = root.descendants().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "c", "d", "e", "f"]);
        Ok(())
    }

    #[test]
    fn it_rejects_an_empty_document() {
        assert!(matches!(parse_document(""), Err(RspecError::MissingRoot)));
        assert!(matches!(
            parse_document("<?xml version=\"1.0\"?><!-- nothing -->"),
            Err(RspecError::MissingRoot)
        ));
    }

    #[test]
    fn it_rejects_unclosed_elements() {
        assert!(matches!(
            parse_document("<rspec><link>"),
            Err(RspecError::Unclosed(_) | RspecError::Xml { .. })
        ));
    }

    #[test]
    fn it_rejects_mismatched_end_tags() {
        assert!(matches!(
            parse_document("<rspec><link></path></rspec>"),
            Err(RspecError::Xml { .. })
        ));
    }

    #[test]
    fn it_rejects_text_around_the_root() {
        for xml in [
            "garbage <rspec/>",
            "<rspec/> trailing",
            "<rspec/><![CDATA[x]]>",
        ] {
            assert!(
                matches!(parse_document(xml), Err(RspecError::StrayText { .. })),
                "expected {xml:?} to be rejected"
            );
        }
    }

    #[test]
    fn it_allows_whitespace_and_text_inside_elements() -> Result<()> {
        let root = parse_document("\n  <rspec>text<![CDATA[more]]></rspec>\n")?;
        assert_eq!(root.name(), "rspec");
        Ok(())
    }

    #[test]
    fn it_accepts_nesting_up_to_the_limit() -> Result<()> {
        let xml = format!(
            "{}<a/>{}",
            "<a>".repeat(MAX_DEPTH - 1),
            "</a>".repeat(MAX_DEPTH - 1)
        );
        parse_document(&xml)?;

        let xml = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        parse_document(&xml)?;
        Ok(())
    }

    #[test]
    fn it_rejects_nesting_past_the_limit() {
        let xml = format!("{}<a/>{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(matches!(
            parse_document(&xml),
            Err(RspecError::TooDeep { limit: MAX_DEPTH })
        ));
    }

    #[test]
    fn it_rejects_multiple_roots() {
        assert!(matches!(
            parse_document("<rspec/><rspec/>"),
            Err(RspecError::MultipleRoots(_))
        ));
    }
}
