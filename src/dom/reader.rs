//! Event-stream-to-tree reader
//!
//! quick-xml reports every problem as a value on the event stream, so a
//! failed parse never leaves state behind for the next call. It also
//! performs no entity loading and no network access, which is the
//! hardening the decoder relies on.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::dom::model::{Document, Element, Node};
use crate::error::{Error, Result};

/// Parser feature flags passed to the external parser
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Drop whitespace-only text nodes and trim surrounding whitespace
    /// from the rest
    pub trim_text: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

impl Document {
    /// Parse XML text into a tree.
    ///
    /// The XML declaration is consumed and not represented as a node;
    /// everything else at the top level (doctype, processing
    /// instructions, comments, the document element) is kept in order so
    /// the decoder can apply its own node-type policy.
    pub fn parse(input: &str, options: &LoadOptions) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        let config = reader.config_mut();
        config.trim_text_start = options.trim_text;
        config.trim_text_end = options.trim_text;

        let mut document = Self::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(Error::malformed(format!(
                        "{e} at byte {}",
                        reader.buffer_position()
                    )))
                }
            };

            match event {
                Event::Decl(_) => {}
                Event::DocType(t) => {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    append(&mut document, &mut stack, Node::DocType(text))?;
                }
                Event::PI(pi) => {
                    let text = String::from_utf8_lossy(&pi).into_owned();
                    append(&mut document, &mut stack, Node::ProcessingInstruction(text))?;
                }
                Event::Comment(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    append(&mut document, &mut stack, Node::Comment(text))?;
                }
                Event::Start(start) => {
                    let element = element_from_start(&start)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    append(&mut document, &mut stack, Node::Element(element))?;
                }
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::malformed(e.to_string()))?
                        .into_owned();
                    if !text.is_empty() {
                        append(&mut document, &mut stack, Node::Text(text))?;
                    }
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    append(&mut document, &mut stack, Node::CData(text))?;
                }
                Event::End(_) => match stack.pop() {
                    Some(element) => {
                        append(&mut document, &mut stack, Node::Element(element))?;
                    }
                    None => return Err(Error::malformed("unmatched closing tag")),
                },
                Event::Eof => {
                    if let Some(open) = stack.last() {
                        return Err(Error::malformed(format!(
                            "unexpected end of document, element '{}' is not closed",
                            open.name
                        )));
                    }
                    break;
                }
            }
        }

        Ok(document)
    }
}

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::malformed(e.to_string()))?
            .into_owned();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

fn append(document: &mut Document, stack: &mut [Element], node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    // Top level: at most one element, and no loose character data.
    // Whitespace between top-level constructs is prolog/epilog filler,
    // not content.
    match &node {
        Node::Element(_) => {
            if document.document_element().is_some() {
                return Err(Error::malformed("extra content after document element"));
            }
        }
        Node::Text(text) => {
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            return Err(Error::malformed("character data outside of root element"));
        }
        Node::CData(_) => {
            return Err(Error::malformed("character data outside of root element"));
        }
        _ => {}
    }
    document.children.push(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::model::NodeKind;

    #[test]
    fn test_parse_simple_element() -> Result<()> {
        let doc = Document::parse("<root><child>text</child></root>", &LoadOptions::default())?;
        let root = doc.document_element().ok_or_else(|| Error::malformed("no root"))?;
        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_attributes_and_entities() -> Result<()> {
        let doc = Document::parse(
            "<root id=\"1\" title=\"a &amp; b\"/>",
            &LoadOptions::default(),
        )?;
        let root = doc.document_element().ok_or_else(|| Error::malformed("no root"))?;
        assert_eq!(root.attributes.get("id").map(String::as_str), Some("1"));
        assert_eq!(
            root.attributes.get("title").map(String::as_str),
            Some("a & b")
        );
        Ok(())
    }

    #[test]
    fn test_parse_keeps_top_level_order() -> Result<()> {
        let doc = Document::parse(
            "<?xml version=\"1.0\"?><?pi data?><!-- note --><root/>",
            &LoadOptions::default(),
        )?;
        let kinds: Vec<_> = doc.children.iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::ProcessingInstruction,
                NodeKind::Comment,
                NodeKind::Element
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_trims_blank_text() -> Result<()> {
        let doc = Document::parse("<a>  <b> 1 </b>  </a>", &LoadOptions::default())?;
        let root = doc.document_element().ok_or_else(|| Error::malformed("no root"))?;
        assert_eq!(root.children.len(), 1);
        match &root.children[0] {
            Node::Element(b) => assert_eq!(b.text(), "1"),
            other => return Err(Error::malformed(format!("unexpected node {other:?}"))),
        }
        Ok(())
    }

    #[test]
    fn test_parse_unclosed_element() {
        let err = Document::parse("<a><b>1</b>", &LoadOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_extra_root() {
        let err = Document::parse("<a/><b/>", &LoadOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_untrimmed_keeps_whitespace_out_of_top_level() -> Result<()> {
        let doc = Document::parse(
            "<?xml version=\"1.0\"?>\n<a> 1 </a>\n",
            &LoadOptions { trim_text: false },
        )?;
        let root = doc.document_element().ok_or_else(|| Error::malformed("no root"))?;
        assert_eq!(root.text(), " 1 ");
        assert_eq!(doc.children.len(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_untrimmed_rejects_text_after_root() {
        let err = Document::parse("<a/>tail", &LoadOptions { trim_text: false });
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_cdata() -> Result<()> {
        let doc = Document::parse("<a><![CDATA[x < y]]></a>", &LoadOptions::default())?;
        let root = doc.document_element().ok_or_else(|| Error::malformed("no root"))?;
        assert_eq!(root.text(), "x < y");
        Ok(())
    }
}
