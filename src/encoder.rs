//! Structured value to XML encoding

use tracing::debug;

use crate::config::Config;
use crate::dom::writer::{serialize_document, serialize_node, Declaration};
use crate::dom::{Document, Element, Node, NodeKind};
use crate::error::{Error, Result};
use crate::value::{Object, Value};

/// Encodes a [`Value`] as XML text.
#[derive(Clone, Debug, Default)]
pub struct XmlEncoder {
    config: Config,
}

impl XmlEncoder {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Encode a structured value as an XML document.
    ///
    /// Objects map to child elements and `@`-prefixed attributes under a
    /// synthesized root named by
    /// [`Config::root_node_name`](crate::Config::root_node_name); scalars
    /// become the root's text content.
    pub fn encode(&self, data: &Value) -> Result<String> {
        debug!(root = %self.config.root_node_name, "encoding value as XML");

        let mut root = Element::new(self.config.root_node_name.clone());
        match data {
            Value::Object(map) => {
                self.build_element(&mut root, map)?;
            }
            scalar => {
                append_scalar(&mut root.children, scalar);
            }
        }

        let mut document = Document::new();
        document.children.push(Node::Element(root));
        serialize_document(&document, self.declaration().as_ref())
    }

    /// Serialize an externally built tree, bypassing the value mapping.
    ///
    /// When [`Config::encoder_ignored_node_types`](crate::Config::encoder_ignored_node_types)
    /// lists [`NodeKind::ProcessingInstruction`], only the document
    /// element is serialized, with no XML declaration. Otherwise top-level
    /// nodes of ignored kinds are skipped and the declaration is emitted.
    pub fn encode_document(&self, document: &Document) -> Result<String> {
        let ignored = &self.config.encoder_ignored_node_types;
        if ignored.contains(&NodeKind::ProcessingInstruction) {
            debug!("serializing document element only");
            return match document.document_element() {
                Some(root) => serialize_node(&Node::Element(root.clone())),
                None => Ok(String::new()),
            };
        }
        if ignored.is_empty() {
            return serialize_document(document, self.declaration().as_ref());
        }
        let filtered = Document {
            children: document
                .children
                .iter()
                .filter(|node| !ignored.contains(&node.kind()))
                .cloned()
                .collect(),
        };
        serialize_document(&filtered, self.declaration().as_ref())
    }

    fn declaration(&self) -> Option<Declaration> {
        if self
            .config
            .encoder_ignored_node_types
            .contains(&NodeKind::ProcessingInstruction)
        {
            return None;
        }
        Some(Declaration {
            version: self.config.version.clone(),
            encoding: self.config.encoding.clone(),
            standalone: self.config.standalone,
        })
    }

    fn build_element(&self, parent: &mut Element, map: &Object) -> Result<()> {
        for (key, value) in map.iter() {
            if let Some(name) = key.strip_prefix('@') {
                if !is_valid_xml_name(name) {
                    return Err(Error::unsupported(format!(
                        "invalid attribute name '{name}'"
                    )));
                }
                parent.set_attribute(name, attribute_text(key, value)?);
            } else if key == "#" {
                append_scalar(&mut parent.children, value);
            } else if is_numeric_key(key) {
                if !self.config.numeric_keys_use_parent_name {
                    return Err(Error::unsupported(format!(
                        "numeric element name '{key}'"
                    )));
                }
                let name = parent.name.clone();
                self.append_node(&mut parent.children, value, &name)?;
            } else {
                self.append_node(&mut parent.children, value, key)?;
            }
        }
        Ok(())
    }

    fn append_node(&self, children: &mut Vec<Node>, data: &Value, name: &str) -> Result<()> {
        if let Value::Array(items) = data {
            // An empty sequence still yields one empty element when
            // sequences are explicit, so the shape survives a roundtrip.
            if items.is_empty() && self.config.as_collection {
                return self.append_node(children, &Value::Null, name);
            }
            for item in items.iter() {
                self.append_node(children, item, name)?;
            }
            return Ok(());
        }

        if !is_valid_xml_name(name) {
            return Err(Error::unsupported(format!("invalid element name '{name}'")));
        }

        let mut element = Element::new(name);
        match data {
            Value::Object(map) => {
                self.build_element(&mut element, map)?;
            }
            scalar => {
                append_scalar(&mut element.children, scalar);
            }
        }

        if self.config.remove_empty_tags
            && element.children.is_empty()
            && element.attributes.is_empty()
        {
            return Ok(());
        }
        children.push(Node::Element(element));
        Ok(())
    }
}

/// Append a scalar as text content, using CDATA when the text contains
/// markup-significant characters.
fn append_scalar(children: &mut Vec<Node>, value: &Value) {
    let text = match value {
        Value::Null => return,
        Value::Bool(b) => format_bool(*b),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        // Non-scalars under "#" have no text form; callers reach this
        // only for scalar values.
        Value::Array(_) | Value::Object(_) => return,
    };
    if text.is_empty() {
        return;
    }
    if text.contains(['<', '>', '&']) {
        children.push(Node::CData(text));
    } else {
        children.push(Node::Text(text));
    }
}

/// Text form of an attribute value. Only scalars are representable.
fn attribute_text(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(format_bool(*b)),
        Value::Number(n) => Ok(format_number(*n)),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(Error::unsupported(format!(
            "attribute '{key}' must be a scalar"
        ))),
    }
}

fn format_bool(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}

/// Integral numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// A conservative XML Name check: letters, digits, `_`, `-`, `.` and
/// `:`, not starting with a digit, `-` or `.`.
fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == ':') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}
