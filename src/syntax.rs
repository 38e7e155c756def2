//! TOPS Format Syntax
//!
//! This module documents the TOPS text format as read by
//! [`parse_document`](crate::parse_document) and written by
//! [`to_string`](crate::to_string).
//!
//! # Overview
//!
//! A TOPS document is a tree of values laid out by indentation, one
//! construct per line. Every leaf is text: there are no numbers, booleans or
//! nulls at the syntax level, and interpreting `8080` as a port number is up
//! to the caller.
//!
//! # Core Syntax
//!
//! ## Mappings
//!
//! One `key: value` entry per line. A key with nothing after the separator
//! opens a block; the entry's value is whatever the deeper-indented lines
//! below it describe, or an empty value if there are none:
//!
//! ```text
//! server:
//!   host: localhost
//!   port: 8080
//! fallback:
//! ```
//!
//! **Rules**:
//! - The first unquoted `:` separates key from value
//! - Keys and values are trimmed of surrounding whitespace
//! - An unquoted value must not contain `:`; quote it instead
//! - A repeated key replaces the earlier value but keeps the earlier position
//!
//! ## Sequences
//!
//! One `- item` line per element. A bare `-` opens a block for the element:
//!
//! ```text
//! ports:
//!   - 80
//!   - 443
//! matrix:
//!   -
//!     - 1
//!     - 2
//! ```
//!
//! Text after the marker is read as a line of its own, starting at the
//! column where the text starts. A mapping element can therefore begin on
//! the marker line and continue aligned under its first key:
//!
//! ```text
//! users:
//!   - name: alice
//!     role: admin
//!   - name: bob
//! ```
//!
//! ## Scalars
//!
//! A line that is neither an entry nor an item is a scalar. It must be the
//! only line of its block, so a document can be a single scalar:
//!
//! ```rust
//! use tops::{parse_document, Value};
//!
//! assert_eq!(parse_document("just text\n").unwrap(), Value::from("just text"));
//! ```
//!
//! ## Empty Containers
//!
//! `{}` and `[]` in value position are an empty mapping and an empty
//! sequence. They differ from an entry with nothing after the separator,
//! which is an empty (untyped) value:
//!
//! ```rust
//! use tops::{parse_document, Kind};
//!
//! let doc = parse_document("a: {}\nb: []\nc:\n").unwrap();
//! assert_eq!(doc.get("a").unwrap().kind(), Kind::Mapping);
//! assert_eq!(doc.get("b").unwrap().kind(), Kind::Sequence);
//! assert_eq!(doc.get("c").unwrap().kind(), Kind::Empty);
//! ```
//!
//! ## Quoted Strings
//!
//! Keys and values may be wrapped in double quotes. Quoted text keeps its
//! whitespace and may contain `:`, `#` and any character through escapes:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\"` | double quote |
//! | `\\` | backslash |
//! | `\n` `\r` `\t` | newline, carriage return, tab |
//! | `\b` `\f` `\0` | backspace, form feed, NUL |
//! | `\uXXXX` | the code point given by four hex digits |
//!
//! Other escapes are kept as written. Nothing may follow a closing quote
//! except, for a key, the `:` separator.
//!
//! ```rust
//! use tops::parse_document;
//!
//! let doc = parse_document(r#""base url": "http://example.com""#).unwrap();
//! assert_eq!(doc.get("base url").unwrap().as_str().unwrap(), "http://example.com");
//! ```
//!
//! # Comments and Blank Lines
//!
//! A line whose first non-blank character is `#` is a comment. Comments and
//! blank lines may appear anywhere, at any indentation, and never affect
//! structure. A `#` later in a line is ordinary text.
//!
//! # Indentation
//!
//! - Indentation is made of spaces; a tab is an error
//! - The first line of a block must be indented deeper than the line that
//!   opened it, and fixes the block's indentation
//! - Siblings share exactly the same indentation
//! - Dedenting must return to the indentation of an enclosing block
//! - Top-level lines start in the first column
//!
//! There is no document-wide indentation unit. Each block's width is set
//! by its own first line, and a nested block need not sit at a multiple of
//! any earlier width. Only the rules above are checked:
//!
//! ```rust
//! use tops::{parse_document, tops, ParseErrorKind};
//!
//! let err = parse_document("a:\n    b: 1\n  c: 2\n").unwrap_err();
//! assert_eq!(err.parse_kind(), Some(ParseErrorKind::BadIndent));
//!
//! let doc = parse_document("a:\n    b:\n     - 1\nc:\n - x\n").unwrap();
//! assert_eq!(doc, tops!({ "a": { "b": ["1"] }, "c": ["x"] }));
//! ```
//!
//! # Canonical Output
//!
//! The printer writes two spaces per level, quotes only what would not read
//! back unchanged, and writes empty containers as `{}` and `[]`. Parsing
//! printed output yields the original tree:
//!
//! ```rust
//! use tops::{parse_document, to_string, tops};
//!
//! let value = tops!({ "list": [[], {}, null, " padded "] });
//! let text = to_string(&value);
//! assert_eq!(text, "list:\n  - []\n  - {}\n  -\n  - \" padded \"\n");
//! assert_eq!(parse_document(&text).unwrap(), value);
//! ```
//!
//! # Errors
//!
//! Every violation stops the parse with a
//! [`ParseError`](crate::ParseError) naming the line and column. See
//! [`ParseErrorKind`](crate::ParseErrorKind) for the categories.

// This module contains only documentation; no implementation code
