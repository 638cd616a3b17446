//! Tree-to-text writer
//!
//! Escaping and declaration emission are quick-xml's job; this module
//! only walks the tree in order.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::dom::model::{Document, Element, Node};
use crate::error::{Error, Result};

/// XML declaration fields
#[derive(Clone, Debug)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: None,
            standalone: None,
        }
    }
}

/// Serialize a whole document, with a leading XML declaration when one
/// is given.
pub fn serialize_document(document: &Document, declaration: Option<&Declaration>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    if let Some(decl) = declaration {
        let standalone = decl.standalone.map(|yes| if yes { "yes" } else { "no" });
        writer
            .write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                standalone,
            )))
            .map_err(write_error)?;
    }

    for node in &document.children {
        write_node(&mut writer, node)?;
    }

    finish(writer)
}

/// Serialize a single node (typically the document element) without any
/// declaration.
pub fn serialize_node(node: &Node) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    finish(writer)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error),
        Node::CData(text) => writer
            .write_event(Event::CData(BytesCData::new(text)))
            .map_err(write_error),
        Node::Comment(text) => writer
            .write_event(Event::Comment(BytesText::new(text)))
            .map_err(write_error),
        Node::ProcessingInstruction(content) => writer
            .write_event(Event::PI(BytesPI::new(content)))
            .map_err(write_error),
        Node::DocType(content) => writer
            .write_event(Event::DocType(BytesText::new(content)))
            .map_err(write_error),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::unsupported(format!("serialized output is not UTF-8: {e}")))
}

fn write_error(e: impl std::fmt::Display) -> Error {
    Error::unsupported(format!("failed to write XML event: {e}"))
}
