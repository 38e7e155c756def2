//! Configuration options for TOPS pretty-printing.
//!
//! ```rust
//! use tops::{to_string_with_options, tops, PrintOptions};
//!
//! let value = tops!({ "server": { "port": 8080 } });
//!
//! let options = PrintOptions::new().with_indent(4);
//! let text = to_string_with_options(&value, &options);
//! assert_eq!(text, "server:\n    port: 8080\n");
//! ```

/// Configuration options for the pretty-printer.
///
/// The parser accepts any indentation width, so output written with any
/// options parses back to the same tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions { indent: 2 }
    }
}

impl PrintOptions {
    /// Creates default options (2-space indent).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::PrintOptions;
    ///
    /// let options = PrintOptions::new();
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    ///
    /// Zero is raised to one, since nested blocks must be indented deeper
    /// than the line that opens them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::PrintOptions;
    ///
    /// assert_eq!(PrintOptions::new().with_indent(4).indent, 4);
    /// assert_eq!(PrintOptions::new().with_indent(0).indent, 1);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }
}
