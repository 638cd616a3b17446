//! Bidirectional conversion between XML text and a structured value
//! model.
//!
//! Decoding maps elements to maps, `@`-prefixed keys to attributes, and
//! the `#` key to an element's own text; repeated sibling tags collapse
//! to sequences. Encoding inverts the mapping under a synthesized root
//! element. Parsing and serialization are delegated to `quick-xml`, and
//! key order is preserved end to end.
//!
//! ```
//! use structxml::{decode, encode, Value};
//!
//! let value = decode("<person><name>Ada</name><name>Grace</name></person>")?;
//! let people = value
//!     .as_object()
//!     .and_then(|o| o.get("name"))
//!     .and_then(Value::as_array)
//!     .map(|a| a.len());
//! assert_eq!(people, Some(2));
//!
//! let xml = encode(&Value::from("hello"))?;
//! assert_eq!(xml, "<?xml version=\"1.0\"?><response>hello</response>");
//! # Ok::<(), structxml::Error>(())
//! ```

pub mod config;
pub mod decoder;
pub mod dom;
pub mod encoder;
pub mod error;
pub mod value;

pub use config::Config;
pub use decoder::XmlDecoder;
pub use encoder::XmlEncoder;
pub use error::{Error, ErrorKind, Result};
pub use value::{Array, Object, Value};

/// Decode XML text with the default configuration.
pub fn decode(input: &str) -> Result<Value> {
    XmlDecoder::new().decode(input)
}

/// Decode XML text with an explicit configuration.
pub fn decode_with_config(input: &str, config: Config) -> Result<Value> {
    XmlDecoder::with_config(config).decode(input)
}

/// Encode a value as XML with the default configuration.
pub fn encode(data: &Value) -> Result<String> {
    XmlEncoder::new().encode(data)
}

/// Encode a value as XML with an explicit configuration.
pub fn encode_with_config(data: &Value, config: Config) -> Result<String> {
    XmlEncoder::with_config(config).encode(data)
}
