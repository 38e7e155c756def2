//! # tops
//!
//! A reader and writer for TOPS, an indentation-structured configuration
//! format, built around a lazily typed value tree.
//!
//! ## What is TOPS?
//!
//! TOPS describes a tree of text values with YAML-like block layout:
//! `key: value` lines build mappings, `- item` lines build sequences, and
//! deeper indentation nests one block inside another. Leaves are always
//! text; deciding what a leaf means is left to the caller.
//!
//! ## Key Features
//!
//! - **Lazy Typing**: a fresh [`Value`] has no variant; the first write through a
//!   scalar, sequence or mapping accessor fixes it
//! - **Ordered Mappings**: entries keep their document order, duplicate keys
//!   overwrite in place
//! - **Precise Errors**: parse errors carry line, column, the offending line
//!   and a hint
//! - **Canonical Output**: printing and re-parsing yields an equal tree
//! - **Serde Bridge**: [`Value`] implements `Serialize` and `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use tops::parse_document;
//!
//! let doc = parse_document(
//!     "# service settings\n\
//!      server:\n\
//!      \x20 host: localhost\n\
//!      \x20 ports:\n\
//!      \x20   - 80\n\
//!      \x20   - 443\n",
//! )
//! .unwrap();
//!
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.get("host").unwrap().as_str().unwrap(), "localhost");
//!
//! let ports = server.get("ports").unwrap().as_sequence().unwrap();
//! assert_eq!(ports.len(), 2);
//! ```
//!
//! ### Building and Printing Trees
//!
//! ```rust
//! use tops::{to_string, tops, Value};
//!
//! let mut doc = tops!({ "name": "demo" });
//! doc.as_mapping_mut().unwrap().entry("tags").push(Value::from("fast")).unwrap();
//!
//! assert_eq!(to_string(&doc), "name: demo\ntags:\n  - fast\n");
//! ```
//!
//! ### Type Errors
//!
//! Once a value's variant is fixed, accessors for another variant fail
//! without touching the value:
//!
//! ```rust
//! use tops::{parse_document, Error, Kind};
//!
//! let mut doc = parse_document("title: hello\n").unwrap();
//! let title = doc.get_mut("title").unwrap();
//!
//! match title.as_sequence_mut() {
//!     Err(Error::TypeMismatch { name, expected, found }) => {
//!         assert_eq!(name.as_deref(), Some("title"));
//!         assert_eq!((expected, found), (Kind::Sequence, Kind::Scalar));
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n) in the input length, single pass, no backtracking
//! - **Printing**: O(n) in the size of the tree
//! - **Memory**: the parser holds one open value per nesting level
//!
//! ## Format Reference
//!
//! See the [`syntax`] module for the full grammar.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod syntax;
pub mod value;

pub use de::Parser;
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use map::Mapping;
pub use options::PrintOptions;
pub use ser::Printer;
pub use value::{Kind, Node, Value};

use std::fs;
use std::io;
use std::path::Path;

/// Parse a TOPS document from a string.
///
/// # Examples
///
/// ```rust
/// use tops::{parse_document, tops};
///
/// let doc = parse_document("a: 1\nb:\n  - x\n").unwrap();
/// assert_eq!(doc, tops!({ "a": "1", "b": ["x"] }));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text violates the grammar. Error messages
/// include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document(s: &str) -> Result<Value> {
    Parser::new(s).parse()
}

/// Load and parse a TOPS file. The root value is named after `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or is not UTF-8, and
/// [`Error::Parse`] if its content violates the grammar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| Error::io(&name, &e.to_string()))?;
    Parser::new(&text).with_root_name(name).parse()
}

/// Parse a TOPS document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tops::from_reader;
///
/// let doc = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(doc.get("y").unwrap().as_str().unwrap(), "2");
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the input is not
/// valid TOPS.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io("<reader>", &e.to_string()))?;
    parse_document(&string)
}

/// Parse a TOPS document from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid TOPS.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Value> {
    let s = std::str::from_utf8(v).map_err(|e| Error::io("<bytes>", &e.to_string()))?;
    parse_document(s)
}

/// Print a value as a TOPS document with default options.
///
/// # Examples
///
/// ```rust
/// use tops::{to_string, tops};
///
/// let text = to_string(&tops!({ "a": ["x", "y"] }));
/// assert_eq!(text, "a:\n  - x\n  - y\n");
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &PrintOptions::default())
}

/// Print a value as a TOPS document with custom options.
#[must_use]
pub fn to_string_with_options(value: &Value, options: &PrintOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = value.pretty_print_with(&mut out, 0, options);
    out
}

/// Print a value as a TOPS document to a writer.
///
/// # Examples
///
/// ```rust
/// use tops::{to_writer, tops};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &tops!({ "a": "1" })).unwrap();
/// assert_eq!(buffer, b"a: 1\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(mut writer: W, value: &Value) -> Result<()> {
    writer
        .write_all(to_string(value).as_bytes())
        .map_err(|e| Error::io("<writer>", &e.to_string()))
}
