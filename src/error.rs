//! Error types for TOPS values and documents.
//!
//! Every fallible operation in this crate returns [`Result`], whose error side
//! is one of four categories:
//!
//! - **Type mismatches**: a [`Value`](crate::Value) accessor was used against a
//!   node whose variant is already fixed to something else
//! - **Parse errors**: the source text violates the TOPS grammar; these carry
//!   line/column information, the offending line and an optional hint
//! - **I/O errors**: a document could not be loaded from disk
//! - **Range errors**: a scalar text operation addressed a position outside the text
//!
//! Parse errors are reported separately from I/O errors so callers can tell a
//! bad file apart from bad content:
//!
//! ```rust
//! use tops::{parse_document, parse_file, Error, ParseErrorKind};
//!
//! let err = parse_document("a: 1\n   b: 2\n").unwrap_err();
//! assert_eq!(err.parse_kind(), Some(ParseErrorKind::BadIndent));
//!
//! let err = parse_file("/definitely/not/here.tops").unwrap_err();
//! assert!(matches!(err, Error::Io { .. }));
//! ```

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A document could not be read
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    /// The document text violates the grammar
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Accessor used against a node fixed to another variant
    #[error("Type mismatch{}: expected {expected}, found {found}", describe_name(.name))]
    TypeMismatch {
        name: Option<String>,
        expected: Kind,
        found: Kind,
    },

    /// Scalar position outside the text or not on a character boundary
    #[error("Position {pos} is out of range for a scalar of length {len}")]
    OutOfRange { pos: usize, len: usize },
}

fn describe_name(name: &Option<String>) -> String {
    match name.as_deref() {
        Some(name) if !name.is_empty() => format!(" at `{}`", name),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a type mismatch error for the node called `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::{Error, Kind};
    ///
    /// let err = Error::type_mismatch(Some("ports"), Kind::Scalar, Kind::Sequence);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Type mismatch at `ports`: expected scalar, found sequence"
    /// );
    /// ```
    pub fn type_mismatch(name: Option<&str>, expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch {
            name: name.map(str::to_string),
            expected,
            found,
        }
    }

    /// Creates an I/O error for a path that could not be loaded.
    pub fn io(path: &str, message: &str) -> Self {
        Error::Io {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates an out-of-range error for a scalar text operation.
    pub fn out_of_range(pos: usize, len: usize) -> Self {
        Error::OutOfRange { pos, len }
    }

    /// Returns the grammar violation category if this is a parse error.
    #[must_use]
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Returns `true` for [`Error::TypeMismatch`].
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}

/// The grammar rule a document broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Indentation does not line up with any enclosing block, or contains a tab
    BadIndent,
    /// Mapping entries, list items and scalars mixed as direct siblings
    MixedContainerKinds,
    /// A structural character appears in an unquoted value
    UnquotedStructural,
    /// A quoted string is missing its closing quote
    UnterminatedQuote,
    /// A malformed escape sequence inside a quoted string
    InvalidEscape,
    /// Text follows a closing quote
    TrailingCharacters,
    /// A key separator with nothing in front of it
    EmptyKey,
    /// A second scalar line inside a block that already holds one
    UnexpectedContent,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::BadIndent => "bad indentation",
            ParseErrorKind::MixedContainerKinds => "mixed container kinds",
            ParseErrorKind::UnquotedStructural => "unquoted structural character",
            ParseErrorKind::UnterminatedQuote => "unterminated quote",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::TrailingCharacters => "trailing characters",
            ParseErrorKind::EmptyKey => "empty key",
            ParseErrorKind::UnexpectedContent => "unexpected content",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grammar violation with its position in the source.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use tops::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(
///     ParseErrorKind::UnquotedStructural,
///     3,
///     12,
///     "unquoted ':' in value",
///     "url: http://example.com",
/// )
/// .with_help("wrap the value in double quotes");
///
/// let text = err.to_string();
/// assert!(text.contains("line 3, column 12"));
/// assert!(text.contains("Help: wrap the value"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}, column {column}: {message}\n  | {context}{help}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub context: String,
    pub help: String,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        line: usize,
        column: usize,
        message: &str,
        context: &str,
    ) -> Self {
        ParseError {
            kind,
            line,
            column,
            message: message.to_string(),
            context: context.to_string(),
            help: String::new(),
        }
    }

    /// Attaches a suggestion shown after the offending line.
    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = format!("\nHelp: {}", help);
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
