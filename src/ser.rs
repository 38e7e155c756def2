//! TOPS pretty-printing.
//!
//! This module provides the [`Printer`] that writes a [`Value`] tree back out
//! as TOPS text. Output is canonical rather than a byte-for-byte copy of the
//! source the tree was parsed from:
//!
//! - **Mappings**: one `key: value` line per entry, nested blocks one level deeper
//! - **Sequences**: one `- item` line per element, nested blocks one level deeper
//! - **Empty containers**: `{}` and `[]`, so they stay distinct from empty values
//! - **Quote minimization**: scalars and keys are quoted only when needed
//!
//! Most users should go through [`Value::pretty_print`] or the crate-level
//! [`to_string`](crate::to_string):
//!
//! ```rust
//! use tops::{to_string, tops};
//!
//! let value = tops!({
//!     "name": "demo",
//!     "empty": {},
//!     "list": ["a", "b: c"]
//! });
//!
//! assert_eq!(
//!     to_string(&value),
//!     "name: demo\nempty: {}\nlist:\n  - a\n  - \"b: c\"\n"
//! );
//! ```

use crate::value::Node;
use crate::{PrintOptions, Value};
use std::fmt::{self, Write};

pub(crate) const EMPTY_MAPPING: &str = "{}";
pub(crate) const EMPTY_SEQUENCE: &str = "[]";
/// Stripped from the start of a document, so never written bare.
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// Writes [`Value`] trees to a text sink.
pub struct Printer<'a, W> {
    out: &'a mut W,
    indent: usize,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(out: &'a mut W, options: &PrintOptions) -> Self {
        Printer {
            out,
            indent: options.indent.max(1),
        }
    }

    /// Writes `value` as a document whose top-level lines start at `level`.
    pub fn print(&mut self, value: &Value, level: usize) -> fmt::Result {
        match value.node() {
            Node::Empty => Ok(()),
            Node::Scalar(text) => {
                self.write_indent(level)?;
                write_scalar(self.out, text)?;
                self.out.write_char('\n')
            }
            Node::Sequence(items) if items.is_empty() => {
                self.write_indent(level)?;
                writeln!(self.out, "{}", EMPTY_SEQUENCE)
            }
            Node::Mapping(map) if map.is_empty() => {
                self.write_indent(level)?;
                writeln!(self.out, "{}", EMPTY_MAPPING)
            }
            Node::Sequence(items) => {
                for item in items {
                    self.write_item(item, level)?;
                }
                Ok(())
            }
            Node::Mapping(map) => {
                for (key, value) in map {
                    self.write_entry(key, value, level)?;
                }
                Ok(())
            }
        }
    }

    fn write_indent(&mut self, level: usize) -> fmt::Result {
        for _ in 0..level * self.indent {
            self.out.write_char(' ')?;
        }
        Ok(())
    }

    fn write_entry(&mut self, key: &str, value: &Value, level: usize) -> fmt::Result {
        self.write_indent(level)?;
        write_key(self.out, key)?;
        self.out.write_char(':')?;
        self.write_tail(value, level)
    }

    fn write_item(&mut self, value: &Value, level: usize) -> fmt::Result {
        self.write_indent(level)?;
        self.out.write_char('-')?;
        self.write_tail(value, level)
    }

    // Finishes a line opened by a key or a list marker.
    fn write_tail(&mut self, value: &Value, level: usize) -> fmt::Result {
        match value.node() {
            Node::Empty => self.out.write_char('\n'),
            Node::Scalar(text) => {
                self.out.write_char(' ')?;
                write_scalar(self.out, text)?;
                self.out.write_char('\n')
            }
            Node::Sequence(items) if items.is_empty() => writeln!(self.out, " {}", EMPTY_SEQUENCE),
            Node::Mapping(map) if map.is_empty() => writeln!(self.out, " {}", EMPTY_MAPPING),
            Node::Sequence(_) | Node::Mapping(_) => {
                self.out.write_char('\n')?;
                self.print(value, level + 1)
            }
        }
    }
}

/// Returns `true` if `s` cannot be written bare in key position.
#[inline]
pub(crate) fn key_needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.starts_with('#')
        || s.starts_with(BYTE_ORDER_MARK)
        || starts_with_list_marker(s)
        || s.chars()
            .any(|ch| ch == ':' || ch == '"' || ch == '\\' || ch.is_control())
}

/// `-` alone or followed by whitespace reads back as a list item.
fn starts_with_list_marker(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('-') && chars.next().map_or(true, char::is_whitespace)
}

/// Returns `true` if `s` cannot be written bare in value position.
#[inline]
pub(crate) fn scalar_needs_quotes(s: &str) -> bool {
    key_needs_quotes(s) || s == EMPTY_MAPPING || s == EMPTY_SEQUENCE
}

fn write_key<W: Write>(out: &mut W, key: &str) -> fmt::Result {
    if key_needs_quotes(key) {
        write_quoted(out, key)
    } else {
        out.write_str(key)
    }
}

fn write_scalar<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    if scalar_needs_quotes(text) {
        write_quoted(out, text)
    } else {
        out.write_str(text)
    }
}

fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            '\0' => out.write_str("\\0")?,
            ch if ch.is_control() || ch == BYTE_ORDER_MARK => {
                write!(out, "\\u{:04x}", ch as u32)?
            }
            ch => out.write_char(ch)?,
        }
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tops, Mapping};

    fn render(value: &Value) -> String {
        let mut out = String::new();
        value.pretty_print(&mut out, 0).unwrap();
        out
    }

    #[test]
    fn test_empty_root_prints_nothing() {
        assert_eq!(render(&Value::new()), "");
    }

    #[test]
    fn test_root_scalar() {
        assert_eq!(render(&Value::from("hello")), "hello\n");
        assert_eq!(render(&Value::from("")), "\"\"\n");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&Value::from(Vec::new())), "[]\n");
        assert_eq!(render(&Value::from(Mapping::new())), "{}\n");
        assert_eq!(
            render(&tops!({ "a": [], "b": {}, "c": null })),
            "a: []\nb: {}\nc:\n"
        );
    }

    #[test]
    fn test_nested_sequences() {
        let value = tops!([["a", "b"], null, "c"]);
        assert_eq!(render(&value), "-\n  - a\n  - b\n-\n- c\n");
    }

    #[test]
    fn test_mapping_inside_sequence() {
        let value = tops!([{ "name": "alice", "role": "admin" }]);
        assert_eq!(render(&value), "-\n  name: alice\n  role: admin\n");
    }

    #[test]
    fn test_quoting_rules() {
        assert!(!scalar_needs_quotes("hello world"));
        assert!(!scalar_needs_quotes("-x"));
        assert!(!scalar_needs_quotes("a#b"));
        assert!(scalar_needs_quotes("a: b"));
        assert!(scalar_needs_quotes(" padded"));
        assert!(scalar_needs_quotes("# not a comment"));
        assert!(scalar_needs_quotes("- not an item"));
        assert!(scalar_needs_quotes("-"));
        assert!(scalar_needs_quotes("[]"));
        assert!(scalar_needs_quotes("say \"hi\""));
        assert!(!key_needs_quotes("[]"));
        assert!(key_needs_quotes(""));
    }

    #[test]
    fn test_escapes() {
        let value = tops!({ "text": "line\nbreak\t\"quoted\" \\" });
        assert_eq!(
            render(&value),
            "text: \"line\\nbreak\\t\\\"quoted\\\" \\\\\"\n"
        );
    }

    #[test]
    fn test_control_characters_use_unicode_escapes() {
        let value = Value::from("\u{1}");
        assert_eq!(render(&value), "\"\\u0001\"\n");
    }

    #[test]
    fn test_byte_order_mark_is_escaped() {
        assert!(key_needs_quotes("\u{feff}x"));
        assert_eq!(render(&Value::from("\u{feff}x")), "\"\\ufeffx\"\n");
        assert_eq!(
            render(&tops!({ "\u{feff}k": "v" })),
            "\"\\ufeffk\": v\n"
        );
    }

    #[test]
    fn test_quoted_keys() {
        let value = tops!({ "a:b": "1", "": "2" });
        assert_eq!(render(&value), "\"a:b\": 1\n\"\": 2\n");
    }

    #[test]
    fn test_indent_level_offset() {
        let value = tops!(["x"]);
        let mut out = String::new();
        value.pretty_print(&mut out, 2).unwrap();
        assert_eq!(out, "    - x\n");
    }
}
