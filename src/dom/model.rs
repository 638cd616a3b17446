//! XML tree model

use indexmap::IndexMap;

/// Node kind, used for the ignored-node-type configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
    DocType,
}

/// A node in the tree
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::CData(_) => NodeKind::CData,
            Self::Comment(_) => NodeKind::Comment,
            Self::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
            Self::DocType(_) => NodeKind::DocType,
        }
    }
}

/// An XML element with ordered attributes and children
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn has_child_nodes(&self) -> bool {
        !self.children.is_empty()
    }

    /// Concatenated text of all descendant text and CDATA nodes, in
    /// document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Attributes that carry element data, with `xmlns` declarations
    /// filtered out
    pub fn data_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(name, _)| !is_namespace_declaration(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Namespace declarations written on this element, as
    /// (`xmlns` or `xmlns:prefix`, uri) pairs
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(name, _)| is_namespace_declaration(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(s) | Node::CData(s) => out.push_str(s),
            Node::Element(el) => collect_text(&el.children, out),
            _ => {}
        }
    }
}

/// A parsed document: the ordered list of top-level nodes
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first top-level element, if any
    pub fn document_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_concatenates_descendants() {
        let mut inner = Element::new("b");
        inner.children.push(Node::Text("world".to_string()));

        let mut el = Element::new("a");
        el.children.push(Node::Text("hello ".to_string()));
        el.children.push(Node::Element(inner));
        el.children.push(Node::CData("!".to_string()));

        assert_eq!(el.text(), "hello world!");
    }

    #[test]
    fn test_namespace_attribute_split() {
        let mut el = Element::new("a");
        el.set_attribute("id", "1");
        el.set_attribute("xmlns", "urn:default");
        el.set_attribute("xmlns:x", "urn:x");

        let data: Vec<_> = el.data_attributes().collect();
        assert_eq!(data, vec![("id", "1")]);

        let ns: Vec<_> = el.namespace_declarations().collect();
        assert_eq!(ns, vec![("xmlns", "urn:default"), ("xmlns:x", "urn:x")]);
    }

    #[test]
    fn test_document_element_skips_non_elements() {
        let mut doc = Document::new();
        doc.children
            .push(Node::Comment("leading comment".to_string()));
        doc.children.push(Node::Element(Element::new("root")));

        assert_eq!(doc.document_element().map(|el| el.name.as_str()), Some("root"));
    }
}
