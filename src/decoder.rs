//! XML to structured value decoding

use tracing::debug;

use crate::config::Config;
use crate::dom::{Document, Element, Node, NodeKind};
use crate::error::{Error, Result};
use crate::value::{Object, Value};

/// Decodes XML text into a [`Value`].
///
/// Document type declarations are rejected unconditionally, and the
/// parser performs no entity loading and no network access.
#[derive(Clone, Debug, Default)]
pub struct XmlDecoder {
    config: Config,
}

impl XmlDecoder {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Decode XML text into a structured value.
    ///
    /// Fails with [`ErrorKind::EmptyInput`](crate::ErrorKind::EmptyInput)
    /// for blank input, [`ErrorKind::MalformedXml`](crate::ErrorKind::MalformedXml)
    /// for any parser-reported problem, and
    /// [`ErrorKind::DisallowedConstruct`](crate::ErrorKind::DisallowedConstruct)
    /// when a DOCTYPE appears anywhere at the top level.
    pub fn decode(&self, input: &str) -> Result<Value> {
        if input.trim().is_empty() {
            return Err(Error::empty_input());
        }
        debug!(len = input.len(), "decoding XML input");

        let document = Document::parse(input, &self.config.load_options)?;

        let mut root: Option<&Node> = None;
        for node in &document.children {
            if node.kind() == NodeKind::DocType {
                return Err(Error::disallowed("document types are not allowed"));
            }
            if root.is_none() && !self.config.decoder_ignored_node_types.contains(&node.kind()) {
                root = Some(node);
            }
        }
        let root = match root {
            Some(Node::Element(el)) => el,
            // A non-ignored comment or processing instruction in root
            // position decodes like a childless, attributeless node: its
            // text content.
            Some(
                Node::Text(s) | Node::CData(s) | Node::Comment(s) | Node::ProcessingInstruction(s),
            ) => {
                return Ok(Value::String(s.clone()));
            }
            Some(Node::DocType(_)) => {
                return Err(Error::disallowed("document types are not allowed"));
            }
            None => return Err(Error::malformed("document has no root element")),
        };

        if root.has_child_nodes() {
            let mut data = Object::new();
            for (name, uri) in root.namespace_declarations() {
                data.insert(format!("@{name}"), uri);
            }
            data.remove("@xmlns:xml");

            let value = self.parse_element(root);
            if data.is_empty() {
                return Ok(value);
            }
            // Merge: namespace keys first, child-derived keys win on
            // collision. A scalar child value lands under key "0".
            match value {
                Value::Object(children) => {
                    for (key, child) in children {
                        data.insert(key, child);
                    }
                }
                other => {
                    data.insert("0", other);
                }
            }
            return Ok(Value::Object(data));
        }

        if root.data_attributes().next().is_none() {
            return Ok(Value::String(root.text()));
        }

        let mut data = Object::new();
        for (name, value) in root.data_attributes() {
            data.insert(format!("@{name}"), value);
        }
        data.insert("#", root.text());
        Ok(Value::Object(data))
    }

    fn parse_element(&self, element: &Element) -> Value {
        let attributes = self.parse_attributes(element);
        let value = self.parse_value(element);

        if attributes.is_empty() {
            return value;
        }

        let mut data = attributes;
        match value {
            Value::Object(children) => {
                for (key, child) in children {
                    data.insert(key, child);
                }
            }
            scalar => {
                data.insert("#", scalar);
            }
        }
        Value::Object(data)
    }

    fn parse_attributes(&self, element: &Element) -> Object {
        let mut data = Object::new();
        for (name, value) in element.data_attributes() {
            let key = format!("@{name}");
            if self.config.type_cast_attributes {
                data.insert(key, cast_attribute(value));
            } else {
                data.insert(key, value);
            }
        }
        data
    }

    fn parse_value(&self, element: &Element) -> Value {
        if element.children.is_empty() {
            return Value::String(element.text());
        }

        if element.children.len() == 1 {
            if let Node::Text(s) | Node::CData(s) = &element.children[0] {
                return Value::String(s.clone());
            }
        }

        // Group child elements by tag name, then unwrap singletons
        // unless sequences were requested explicitly.
        let mut grouped: indexmap::IndexMap<String, Vec<Value>> = indexmap::IndexMap::new();
        for child in &element.children {
            if self.config.decoder_ignored_node_types.contains(&child.kind()) {
                continue;
            }
            if let Node::Element(el) = child {
                grouped
                    .entry(el.name.clone())
                    .or_default()
                    .push(self.parse_element(el));
            }
        }

        let mut data = Object::new();
        for (key, values) in grouped {
            if self.config.as_collection || values.len() > 1 {
                data.insert(key, Value::from(values));
            } else {
                let value = values.into_iter().next().unwrap_or_default();
                data.insert(key, value);
            }
        }
        Value::Object(data)
    }
}

/// Cast an attribute value to a number when it looks like one: pure
/// digit strings without a redundant leading zero, and plain decimal
/// strings. A leading minus sign is recognized on decimals only;
/// `-5` stays a string while `-1.5` becomes a number.
fn cast_attribute(raw: &str) -> Value {
    if is_integer_literal(raw) || is_decimal_literal(raw) {
        if let Ok(n) = raw.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }
    Value::String(raw.to_owned())
}

fn is_integer_literal(s: &str) -> bool {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    s.len() == 1 || !s.starts_with('0')
}

fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let Some((whole, fraction)) = unsigned.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && !fraction.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}
