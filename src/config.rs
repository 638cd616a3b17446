//! Shared configuration for the decoder and encoder

use crate::dom::{LoadOptions, NodeKind};

/// Configuration shared by [`XmlDecoder`](crate::XmlDecoder) and
/// [`XmlEncoder`](crate::XmlEncoder). Read-only after construction.
#[derive(Clone, Debug)]
pub struct Config {
    /// Always render repeated children as explicit sequences, even for a
    /// single occurrence
    pub as_collection: bool,
    /// Node kinds skipped while decoding
    pub decoder_ignored_node_types: Vec<NodeKind>,
    /// Node kinds skipped while encoding; listing
    /// [`NodeKind::ProcessingInstruction`] suppresses the XML declaration
    pub encoder_ignored_node_types: Vec<NodeKind>,
    /// Parser feature flags passed to the external parser
    pub load_options: LoadOptions,
    /// Drop elements that would serialize with no content and no
    /// attributes
    pub remove_empty_tags: bool,
    /// Tag name for the synthesized root element
    pub root_node_name: String,
    /// Cast numeric-looking attribute values to numbers while decoding
    pub type_cast_attributes: bool,
    /// Reuse the parent's tag name for pure-integer mapping keys
    /// (compatibility with collapsed-sequence round-trips); when off,
    /// such keys fail as unsupported element names
    pub numeric_keys_use_parent_name: bool,
    /// XML declaration version
    pub version: String,
    /// XML declaration encoding, omitted when None
    pub encoding: Option<String>,
    /// XML declaration standalone flag, omitted when None
    pub standalone: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            as_collection: false,
            decoder_ignored_node_types: vec![NodeKind::ProcessingInstruction, NodeKind::Comment],
            encoder_ignored_node_types: Vec::new(),
            load_options: LoadOptions::default(),
            remove_empty_tags: false,
            root_node_name: "response".to_string(),
            type_cast_attributes: true,
            numeric_keys_use_parent_name: true,
            version: "1.0".to_string(),
            encoding: None,
            standalone: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_collection(mut self, yes: bool) -> Self {
        self.as_collection = yes;
        self
    }

    pub fn decoder_ignored_node_types(mut self, kinds: Vec<NodeKind>) -> Self {
        self.decoder_ignored_node_types = kinds;
        self
    }

    pub fn encoder_ignored_node_types(mut self, kinds: Vec<NodeKind>) -> Self {
        self.encoder_ignored_node_types = kinds;
        self
    }

    pub fn load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = options;
        self
    }

    pub fn remove_empty_tags(mut self, yes: bool) -> Self {
        self.remove_empty_tags = yes;
        self
    }

    pub fn root_node_name(mut self, name: impl Into<String>) -> Self {
        self.root_node_name = name.into();
        self
    }

    pub fn type_cast_attributes(mut self, yes: bool) -> Self {
        self.type_cast_attributes = yes;
        self
    }

    pub fn numeric_keys_use_parent_name(mut self, yes: bool) -> Self {
        self.numeric_keys_use_parent_name = yes;
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn standalone(mut self, yes: bool) -> Self {
        self.standalone = Some(yes);
        self
    }
}
