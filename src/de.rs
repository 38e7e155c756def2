//! TOPS document parsing.
//!
//! This module provides the [`Parser`] that turns TOPS text into a
//! [`Value`] tree.
//!
//! ## Overview
//!
//! - **Line-oriented**: one pass over the input, one line at a time
//! - **Indentation tracking**: a stack of open blocks, each remembering the
//!   column its lines start at
//! - **Error reporting**: every grammar violation aborts the parse with a
//!   [`ParseError`] carrying line, column and the offending line
//!
//! Most users should use the crate-level [`parse_document`](crate::parse_document):
//!
//! ```rust
//! use tops::{parse_document, tops};
//!
//! let doc = parse_document(
//!     "server:\n  host: localhost\n  ports:\n    - 80\n    - 443\n",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     doc,
//!     tops!({ "server": { "host": "localhost", "ports": ["80", "443"] } })
//! );
//! ```
//!
//! ## Blocks
//!
//! A line ending in `key:` or a bare `-` opens a block. The first non-blank
//! line after it must be indented deeper than the opening line, and that
//! line fixes the block's column; its siblings must start at exactly the same
//! column. A dedent closes blocks until it lands on an enclosing block's
//! column, and is a [`ParseErrorKind::BadIndent`] if it lands between two.
//!
//! Text after a list marker is read as if it were a line starting at that
//! column, so a mapping element can begin on the marker line:
//!
//! ```rust
//! use tops::{parse_document, tops};
//!
//! let doc = parse_document("- name: alice\n  role: admin\n- name: bob\n").unwrap();
//! assert_eq!(
//!     doc,
//!     tops!([{ "name": "alice", "role": "admin" }, { "name": "bob" }])
//! );
//! ```

use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::ser::{BYTE_ORDER_MARK, EMPTY_MAPPING, EMPTY_SEQUENCE};
use crate::value::{Kind, Node};
use crate::{Mapping, Value};
use std::cmp::Ordering;

const LIST_MARKER: char = '-';
const COMMENT_MARKER: char = '#';
const KEY_SEPARATOR: char = ':';
const QUOTE: char = '"';

/// Where a block's value goes once the block closes.
enum Slot {
    Key(String),
    Item,
}

struct Frame {
    /// Column of the block's lines, fixed by its first line.
    depth: Option<usize>,
    /// Column of the line that opened the block.
    opener: usize,
    slot: Slot,
    value: Value,
    /// Set once a scalar line has filled the block.
    sealed: bool,
}

impl Frame {
    fn root(value: Value) -> Self {
        Frame {
            depth: Some(0),
            opener: 0,
            slot: Slot::Item,
            value,
            sealed: false,
        }
    }

    fn pending(opener: usize, slot: Slot, value: Value) -> Self {
        Frame {
            depth: None,
            opener,
            slot,
            value,
            sealed: false,
        }
    }

    fn open(depth: usize, slot: Slot, value: Value) -> Self {
        Frame {
            depth: Some(depth),
            opener: depth,
            slot,
            value,
            sealed: false,
        }
    }
}

/// A source line with trailing whitespace removed.
#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn column(&self, at: usize) -> usize {
        self.text[..at].chars().count() + 1
    }

    fn error(&self, kind: ParseErrorKind, at: usize, message: &str) -> ParseError {
        ParseError::new(kind, self.number, self.column(at), message, self.text)
    }

    /// Byte offset of the first non-blank character at or after `from`.
    fn skip_blanks(&self, from: usize) -> Option<usize> {
        let rest = &self.text[from..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            None
        } else {
            Some(from + rest.len() - trimmed.len())
        }
    }
}

/// What a line (or the remainder of a list-item line) contributes.
enum Content {
    Item { rest: Option<usize> },
    Entry { key: String, value: Option<usize> },
    Scalar,
}

/// The TOPS parser.
///
/// Created via [`Parser::new`] and consumed by [`Parser::parse`].
pub struct Parser<'a> {
    input: &'a str,
    root: Frame,
    stack: Vec<Frame>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input: input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input),
            root: Frame::root(Value::new()),
            stack: Vec::new(),
        }
    }

    /// Names the root value, e.g. after the file the text came from.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root.value.set_name(name);
        self
    }

    /// Parses the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on the first grammar violation.
    pub fn parse(mut self) -> Result<Value> {
        let input = self.input;
        for (index, raw) in input.lines().enumerate() {
            let line = Line {
                number: index + 1,
                text: raw.trim_end(),
            };
            if let Some(depth) = indentation(&line)? {
                self.align(&line, depth)?;
                self.dispatch(&line, depth)?;
            }
        }

        while !self.stack.is_empty() {
            self.close()?;
        }
        Ok(self.root.value)
    }

    fn top(&self) -> &Frame {
        self.stack.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    /// Closes the innermost open block and hands its value to the parent.
    fn close(&mut self) -> Result<()> {
        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };
        let parent = &mut self.top_mut().value;
        match frame.slot {
            Slot::Key(key) => {
                parent.as_mapping_mut()?.insert(key, frame.value);
            }
            Slot::Item => parent.as_sequence_mut()?.push(frame.value),
        }
        Ok(())
    }

    /// Opens, keeps or closes blocks so that the top block sits at `depth`.
    fn align(&mut self, line: &Line, depth: usize) -> Result<()> {
        let top = self.top_mut();
        if top.depth.is_none() {
            if depth > top.opener {
                top.depth = Some(depth);
                return Ok(());
            }
            // Nothing nested under the opener: the block stays empty.
            self.close()?;
        }

        let mut dedented = false;
        while !self.stack.is_empty() && self.top().depth.map_or(false, |d| d > depth) {
            self.close()?;
            dedented = true;
        }

        let current = self.top().depth.unwrap_or(0);
        match current.cmp(&depth) {
            Ordering::Equal => Ok(()),
            Ordering::Less if !dedented => Err(line
                .error(
                    ParseErrorKind::BadIndent,
                    depth,
                    &format!(
                        "unexpected indentation: expected {} spaces, found {}",
                        current, depth
                    ),
                )
                .with_help("only a line ending in ':' or a bare '-' can be followed by a deeper block")
                .into()),
            _ => Err(line
                .error(
                    ParseErrorKind::BadIndent,
                    depth,
                    &format!(
                        "indentation of {} spaces does not match any enclosing block",
                        depth
                    ),
                )
                .with_help(&format!("the enclosing block is indented {} spaces", current))
                .into()),
        }
    }

    fn dispatch(&mut self, line: &Line, start: usize) -> Result<()> {
        let mut start = start;
        loop {
            if self.top().sealed {
                return Err(line
                    .error(
                        ParseErrorKind::UnexpectedContent,
                        start,
                        "block already holds a scalar value",
                    )
                    .with_help("quote multi-line text and write line breaks as \\n")
                    .into());
            }

            match classify(line, start)? {
                // `- - x` opens one item per marker; walk them without recursing.
                Content::Item { rest } => match self.item(line, start, rest)? {
                    Some(at) => start = at,
                    None => return Ok(()),
                },
                Content::Entry { key, value } => return self.entry(line, start, key, value),
                Content::Scalar => return self.scalar(line, start),
            }
        }
    }

    /// Opens a sequence element; returns where the text after the marker
    /// starts, if there is any.
    fn item(&mut self, line: &Line, start: usize, rest: Option<usize>) -> Result<Option<usize>> {
        let parent = &mut self.top_mut().value;
        let index = parent
            .as_sequence_mut()
            .map_err(|err| mixed(line, start, "list item", err))?
            .len();
        let name = format!("{}[{}]", parent.name().unwrap_or_default(), index);

        let frame = match rest {
            None => Frame::pending(start, Slot::Item, Value::named(name)),
            Some(at) => Frame::open(at, Slot::Item, Value::named(name)),
        };
        self.stack.push(frame);
        Ok(rest)
    }

    fn entry(&mut self, line: &Line, start: usize, key: String, value: Option<usize>) -> Result<()> {
        let parent = &mut self.top_mut().value;
        let map = parent
            .as_mapping_mut()
            .map_err(|err| mixed(line, start, "mapping entry", err))?;

        match value {
            Some(at) => {
                let child = Value::from(parse_inline(line, at)?).with_name(key.as_str());
                map.insert(key, child);
            }
            None => {
                let child = Value::named(key.as_str());
                self.stack
                    .push(Frame::pending(start, Slot::Key(key), child));
            }
        }
        Ok(())
    }

    fn scalar(&mut self, line: &Line, start: usize) -> Result<()> {
        let node = parse_inline(line, start)?;
        let top = self.top_mut();
        match top.value.kind() {
            Kind::Empty => {
                *top.value.node_mut() = node;
                top.sealed = true;
                Ok(())
            }
            found => Err(line
                .error(
                    ParseErrorKind::MixedContainerKinds,
                    start,
                    &format!("scalar cannot share a block with {} content", found),
                )
                .with_help("did you forget the ':' after a key?")
                .into()),
        }
    }
}

fn mixed(line: &Line, start: usize, what: &str, err: Error) -> Error {
    match err {
        Error::TypeMismatch { found, .. } => line
            .error(
                ParseErrorKind::MixedContainerKinds,
                start,
                &format!("{} cannot share a block with {} content", what, found),
            )
            .with_help("keep list items and 'key: value' entries in separate blocks")
            .into(),
        other => other,
    }
}

/// Measures leading spaces; `None` for blank and comment lines.
fn indentation(line: &Line) -> std::result::Result<Option<usize>, ParseError> {
    let content = line.text.trim_start();
    if content.is_empty() || content.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }

    let depth = line.text.len() - content.len();
    if let Some(at) = line.text[..depth].find(|ch: char| ch != ' ') {
        return Err(line
            .error(
                ParseErrorKind::BadIndent,
                at,
                "indentation must consist of spaces",
            )
            .with_help("replace tabs with spaces"));
    }
    Ok(Some(depth))
}

fn classify(line: &Line, start: usize) -> std::result::Result<Content, ParseError> {
    let text = &line.text[start..];

    let mut chars = text.chars();
    if chars.next() == Some(LIST_MARKER) && chars.next().map_or(true, char::is_whitespace) {
        return Ok(Content::Item {
            rest: line.skip_blanks(start + LIST_MARKER.len_utf8()),
        });
    }

    if text.starts_with(QUOTE) {
        let (key, end) = parse_quoted(line, start)?;
        return match line.skip_blanks(end) {
            None => Ok(Content::Scalar),
            Some(at) if line.text[at..].starts_with(KEY_SEPARATOR) => Ok(Content::Entry {
                key,
                value: line.skip_blanks(at + KEY_SEPARATOR.len_utf8()),
            }),
            Some(at) => Err(line.error(
                ParseErrorKind::TrailingCharacters,
                at,
                "unexpected characters after closing quote",
            )),
        };
    }

    match text.find(KEY_SEPARATOR) {
        Some(offset) => {
            let key = text[..offset].trim_end();
            if key.is_empty() {
                return Err(line
                    .error(ParseErrorKind::EmptyKey, start, "missing key before ':'")
                    .with_help("write an empty key as \"\""));
            }
            Ok(Content::Entry {
                key: key.to_string(),
                value: line.skip_blanks(start + offset + KEY_SEPARATOR.len_utf8()),
            })
        }
        None => Ok(Content::Scalar),
    }
}

/// Reads the value written on the line itself, from `start` to the end.
fn parse_inline(line: &Line, start: usize) -> std::result::Result<Node, ParseError> {
    let text = &line.text[start..];

    if text.starts_with(QUOTE) {
        let (value, end) = parse_quoted(line, start)?;
        if let Some(at) = line.skip_blanks(end) {
            return Err(line.error(
                ParseErrorKind::TrailingCharacters,
                at,
                "unexpected characters after closing quote",
            ));
        }
        return Ok(Node::Scalar(value));
    }

    match text {
        EMPTY_MAPPING => Ok(Node::Mapping(Mapping::new())),
        EMPTY_SEQUENCE => Ok(Node::Sequence(Vec::new())),
        _ => match text.find(KEY_SEPARATOR) {
            Some(offset) => Err(line
                .error(
                    ParseErrorKind::UnquotedStructural,
                    start + offset,
                    "unquoted ':' in value",
                )
                .with_help("wrap the value in double quotes")),
            None => Ok(Node::Scalar(text.to_string())),
        },
    }
}

/// Reads a double-quoted string starting at `start`; returns the text and
/// the offset just past the closing quote.
fn parse_quoted(line: &Line, start: usize) -> std::result::Result<(String, usize), ParseError> {
    let body = start + QUOTE.len_utf8();
    let mut chars = line.text[body..]
        .char_indices()
        .map(|(offset, ch)| (body + offset, ch));
    let mut result = String::new();

    while let Some((at, ch)) = chars.next() {
        match ch {
            '"' => return Ok((result, at + 1)),
            '\\' => match chars.next() {
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, 'n')) => result.push('\n'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'b')) => result.push('\u{0008}'),
                Some((_, 'f')) => result.push('\u{000C}'),
                Some((_, '0')) => result.push('\0'),
                Some((_, 'u')) => {
                    let mut hex = String::with_capacity(4);
                    for _ in 0..4 {
                        match chars.next() {
                            Some((_, digit)) if digit.is_ascii_hexdigit() => hex.push(digit),
                            _ => {
                                return Err(line.error(
                                    ParseErrorKind::InvalidEscape,
                                    at,
                                    "expected 4 hex digits after \\u",
                                ))
                            }
                        }
                    }
                    let decoded = u32::from_str_radix(&hex, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or_else(|| {
                            line.error(
                                ParseErrorKind::InvalidEscape,
                                at,
                                "invalid unicode code point",
                            )
                        })?;
                    result.push(decoded);
                }
                // Unknown escapes are kept literally
                Some((_, other)) => {
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            },
            other => result.push(other),
        }
    }

    Err(line
        .error(
            ParseErrorKind::UnterminatedQuote,
            start,
            "missing closing quote",
        )
        .with_help("quoted text cannot span lines; write line breaks as \\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tops;

    fn parse(input: &str) -> Result<Value> {
        Parser::new(input).parse()
    }

    fn parse_err(input: &str) -> ParseError {
        match parse(input) {
            Err(Error::Parse(err)) => err,
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap(), Value::new());
        assert_eq!(parse("\n\n  \n# only a comment\n").unwrap(), Value::new());
    }

    #[test]
    fn test_flat_mapping() {
        let value = parse("name: Alice\nage: 30\n").unwrap();
        assert_eq!(value, tops!({ "name": "Alice", "age": "30" }));
        assert_eq!(value.get("name").unwrap().name(), Some("name"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let value = parse("note:    hello world   \n").unwrap();
        assert_eq!(value.get("note").unwrap().as_str().unwrap(), "hello world");
    }

    #[test]
    fn test_key_without_space() {
        let value = parse("a:b\n").unwrap();
        assert_eq!(value, tops!({ "a": "b" }));
    }

    #[test]
    fn test_open_key_without_children_is_empty() {
        let value = parse("a:\nb: 1\nc:\n").unwrap();
        assert!(value.get("a").unwrap().is_empty());
        assert!(value.get("c").unwrap().is_empty());
    }

    #[test]
    fn test_sequence_of_empty_items() {
        let value = parse("-\n-\n").unwrap();
        assert_eq!(value, tops!([null, null]));
    }

    #[test]
    fn test_nested_sequences_inline() {
        let value = parse("- - a\n  - b\n- c\n").unwrap();
        assert_eq!(value, tops!([["a", "b"], "c"]));
    }

    #[test]
    fn test_long_run_of_markers_on_one_line() {
        let depth = 2_000;
        let value = parse(&format!("{}x\n- y\n", "- ".repeat(depth))).unwrap();

        let items = value.as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Value::from("y"));

        let mut current = &items[0];
        for _ in 1..depth {
            let inner = current.as_sequence().unwrap();
            assert_eq!(inner.len(), 1);
            current = &inner[0];
        }
        assert_eq!(current.as_str().unwrap(), "x");
    }

    #[test]
    fn test_block_item() {
        let value = parse("-\n  name: alice\n  tags:\n    - x\n").unwrap();
        assert_eq!(value, tops!([{ "name": "alice", "tags": ["x"] }]));
    }

    #[test]
    fn test_item_names() {
        let value = Parser::new("ports:\n  - 80\n  - 443\n").parse().unwrap();
        let ports = value.get("ports").unwrap();
        assert_eq!(ports.get_index(1).unwrap().name(), Some("ports[1]"));
    }

    #[test]
    fn test_root_name() {
        let value = Parser::new("a: 1")
            .with_root_name("config.tops")
            .parse()
            .unwrap();
        assert_eq!(value.name(), Some("config.tops"));
    }

    #[test]
    fn test_root_scalar() {
        assert_eq!(parse("hello\n").unwrap(), Value::from("hello"));
        assert_eq!(parse("\"\"\n").unwrap(), Value::from(""));
    }

    #[test]
    fn test_empty_container_markers() {
        let value = parse("a: {}\nb: []\nc: \"{}\"\n").unwrap();
        assert_eq!(value.get("a").unwrap().kind(), Kind::Mapping);
        assert_eq!(value.get("b").unwrap().kind(), Kind::Sequence);
        assert_eq!(value.get("c").unwrap().as_str().unwrap(), "{}");
    }

    #[test]
    fn test_quoted_key_and_value() {
        let value = parse("\"a: b\": \"c: d\"\n").unwrap();
        assert_eq!(value.get("a: b").unwrap().as_str().unwrap(), "c: d");
    }

    #[test]
    fn test_escapes() {
        let value = parse(r#"s: "tab\tquote\"back\\slash\u00e9 \q""#).unwrap();
        assert_eq!(
            value.get("s").unwrap().as_str().unwrap(),
            "tab\tquote\"back\\slash\u{e9} \\q"
        );
    }

    #[test]
    fn test_crlf_and_bom() {
        let value = parse("\u{feff}a: 1\r\nb:\r\n  - x\r\n").unwrap();
        assert_eq!(value, tops!({ "a": "1", "b": ["x"] }));
    }

    #[test]
    fn test_dedent_to_middle_level() {
        let input = "a:\n  b:\n    c: 1\n  d: 2\ne: 3\n";
        let value = parse(input).unwrap();
        assert_eq!(value, tops!({ "a": { "b": { "c": "1" }, "d": "2" }, "e": "3" }));
    }

    #[test]
    fn test_bad_dedent() {
        let err = parse_err("a:\n    b: 1\n  c: 2\n");
        assert_eq!(err.kind, ParseErrorKind::BadIndent);
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_unexpected_indent() {
        let err = parse_err("a: 1\n  b: 2\n");
        assert_eq!(err.kind, ParseErrorKind::BadIndent);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_indented_first_line() {
        assert_eq!(parse_err("  a: 1\n").kind, ParseErrorKind::BadIndent);
    }

    #[test]
    fn test_tab_indentation() {
        let err = parse_err("a:\n\tb: 1\n");
        assert_eq!(err.kind, ParseErrorKind::BadIndent);
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_mixed_siblings() {
        let err = parse_err("a: 1\n- b\n");
        assert_eq!(err.kind, ParseErrorKind::MixedContainerKinds);
        assert_eq!(err.line, 2);

        let err = parse_err("- b\na: 1\n");
        assert_eq!(err.kind, ParseErrorKind::MixedContainerKinds);

        let err = parse_err("a: 1\nplain\n");
        assert_eq!(err.kind, ParseErrorKind::MixedContainerKinds);
    }

    #[test]
    fn test_second_scalar_line() {
        let err = parse_err("first\nsecond\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedContent);

        let err = parse_err("- a\n  b\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedContent);
    }

    #[test]
    fn test_unquoted_colon_in_value() {
        let err = parse_err("url: http://example.com\n");
        assert_eq!(err.kind, ParseErrorKind::UnquotedStructural);
        assert_eq!(err.column, 10);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_err("a: \"open\n");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);
        assert_eq!(err.column, 4);
    }

    #[test]
    fn test_trailing_after_quote() {
        assert_eq!(
            parse_err("a: \"x\" y\n").kind,
            ParseErrorKind::TrailingCharacters
        );
        assert_eq!(
            parse_err("\"k\" x: 1\n").kind,
            ParseErrorKind::TrailingCharacters
        );
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(parse_err(": 1\n").kind, ParseErrorKind::EmptyKey);
    }

    #[test]
    fn test_invalid_unicode_escape() {
        assert_eq!(
            parse_err("a: \"\\u12\"\n").kind,
            ParseErrorKind::InvalidEscape
        );
        assert_eq!(
            parse_err("a: \"\\ud800\"\n").kind,
            ParseErrorKind::InvalidEscape
        );
    }

    #[test]
    fn test_error_column_counts_characters() {
        let err = parse_err("é: \"x\" y\n");
        assert_eq!(err.column, 8);
    }
}
