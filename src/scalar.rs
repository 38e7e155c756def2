//! String operations on scalar values.
//!
//! These methods forward to the [`String`] held by a scalar [`Value`], so
//! callers can inspect and edit scalar text without unwrapping it first.
//!
//! - **Reads** (`at`, `substr`, `find`, ...) require the value to already be
//!   a scalar and fail with [`TypeMismatch`](crate::Error::TypeMismatch)
//!   otherwise, an empty value included
//! - **Writes** (`assign`, `append`, `insert_str`, ...) fix an empty value as
//!   a scalar first, like [`Value::as_scalar_mut`]
//!
//! Positions are byte offsets into the UTF-8 text. A position past the end,
//! or one that falls inside a multi-byte character, is an
//! [`OutOfRange`](crate::Error::OutOfRange) error.
//!
//! ```rust
//! use tops::Value;
//!
//! let mut value = Value::new();
//! value.assign("localhost:8080").unwrap();
//!
//! let colon = value.find(":").unwrap().unwrap();
//! assert_eq!(value.substr(..colon).unwrap(), "localhost");
//!
//! value.replace_range(colon + 1.., "443").unwrap();
//! assert_eq!(value.as_str().unwrap(), "localhost:443");
//! ```

use crate::error::{Error, Result};
use crate::Value;
use std::cmp::Ordering;
use std::ops::{Bound, Range, RangeBounds};

fn check_boundary(text: &str, pos: usize) -> Result<()> {
    if text.is_char_boundary(pos) {
        Ok(())
    } else {
        Err(Error::out_of_range(pos, text.len()))
    }
}

fn resolve<R: RangeBounds<usize>>(text: &str, range: R) -> Result<Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&pos) => pos,
        Bound::Excluded(&pos) => pos.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&pos) => pos.saturating_add(1),
        Bound::Excluded(&pos) => pos,
        Bound::Unbounded => text.len(),
    };

    check_boundary(text, start)?;
    check_boundary(text, end)?;
    if start > end {
        return Err(Error::out_of_range(start, text.len()));
    }
    Ok(start..end)
}

impl Value {
    /// Returns the character starting at byte `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the value is a scalar, and
    /// [`Error::OutOfRange`] if no character starts at `pos`.
    pub fn at(&self, pos: usize) -> Result<char> {
        let text = self.as_str()?;
        text.get(pos..)
            .and_then(|rest| rest.chars().next())
            .ok_or_else(|| Error::out_of_range(pos, text.len()))
    }

    /// Returns the first character.
    pub fn front(&self) -> Result<char> {
        self.at(0)
    }

    /// Returns the last character.
    pub fn back(&self) -> Result<char> {
        let text = self.as_str()?;
        text.chars()
            .next_back()
            .ok_or_else(|| Error::out_of_range(0, 0))
    }

    /// Returns the text in `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::Value;
    ///
    /// let value = Value::from("hello world");
    /// assert_eq!(value.substr(6..).unwrap(), "world");
    /// assert!(value.substr(6..20).is_err());
    /// ```
    pub fn substr<R: RangeBounds<usize>>(&self, range: R) -> Result<&str> {
        let text = self.as_str()?;
        let range = resolve(text, range)?;
        Ok(&text[range])
    }

    /// Compares the text with `other` lexicographically by bytes.
    pub fn compare(&self, other: &str) -> Result<Ordering> {
        Ok(self.as_str()?.cmp(other))
    }

    /// Byte offset of the first occurrence of `pattern`.
    pub fn find(&self, pattern: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.find(pattern))
    }

    /// Byte offset of the last occurrence of `pattern`.
    pub fn rfind(&self, pattern: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.rfind(pattern))
    }

    /// Byte offset of the first character contained in `set`.
    pub fn find_first_of(&self, set: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.find(|ch: char| set.contains(ch)))
    }

    /// Byte offset of the first character not contained in `set`.
    pub fn find_first_not_of(&self, set: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.find(|ch: char| !set.contains(ch)))
    }

    /// Byte offset of the last character contained in `set`.
    pub fn find_last_of(&self, set: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.rfind(|ch: char| set.contains(ch)))
    }

    /// Byte offset of the last character not contained in `set`.
    pub fn find_last_not_of(&self, set: &str) -> Result<Option<usize>> {
        Ok(self.as_str()?.rfind(|ch: char| !set.contains(ch)))
    }

    /// Replaces the whole text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a sequence or mapping.
    pub fn assign(&mut self, text: impl Into<String>) -> Result<()> {
        *self.as_scalar_mut()? = text.into();
        Ok(())
    }

    pub fn append(&mut self, text: &str) -> Result<()> {
        self.as_scalar_mut()?.push_str(text);
        Ok(())
    }

    pub fn push_char(&mut self, ch: char) -> Result<()> {
        self.as_scalar_mut()?.push(ch);
        Ok(())
    }

    /// Removes and returns the last character, if any.
    pub fn pop_char(&mut self) -> Result<Option<char>> {
        Ok(self.as_scalar_mut()?.pop())
    }

    /// Inserts `text` at byte `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is past the end or not on a
    /// character boundary.
    pub fn insert_str(&mut self, pos: usize, text: &str) -> Result<()> {
        let target = self.as_scalar_mut()?;
        check_boundary(target, pos)?;
        target.insert_str(pos, text);
        Ok(())
    }

    pub fn insert_char(&mut self, pos: usize, ch: char) -> Result<()> {
        let target = self.as_scalar_mut()?;
        check_boundary(target, pos)?;
        target.insert(pos, ch);
        Ok(())
    }

    /// Removes the text in `range` and returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::Value;
    ///
    /// let mut value = Value::from("key = value");
    /// assert_eq!(value.erase(3..6).unwrap(), " = ");
    /// assert_eq!(value.as_str().unwrap(), "keyvalue");
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) -> Result<String> {
        let target = self.as_scalar_mut()?;
        let range = resolve(target, range)?;
        Ok(target.drain(range).collect())
    }

    /// Replaces the text in `range` with `replacement`.
    pub fn replace_range<R: RangeBounds<usize>>(&mut self, range: R, replacement: &str) -> Result<()> {
        let target = self.as_scalar_mut()?;
        let range = resolve(target, range)?;
        target.replace_range(range, replacement);
        Ok(())
    }

    /// Shortens the text to `len` bytes; longer lengths leave it unchanged.
    pub fn truncate(&mut self, len: usize) -> Result<()> {
        let target = self.as_scalar_mut()?;
        if len < target.len() {
            check_boundary(target, len)?;
            target.truncate(len);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Kind, Value};
    use std::cmp::Ordering;

    #[test]
    fn test_reads_require_scalar() {
        let value = Value::new();
        assert!(value.at(0).unwrap_err().is_type_mismatch());
        assert!(value.find("x").unwrap_err().is_type_mismatch());
        assert!(value.is_empty());

        let list = Value::from(vec![Value::from("a")]);
        assert!(list.front().unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_writes_fix_empty_as_scalar() {
        let mut value = Value::new();
        value.append("abc").unwrap();
        assert_eq!(value.kind(), Kind::Scalar);
        assert_eq!(value.as_str().unwrap(), "abc");
    }

    #[test]
    fn test_writes_reject_containers() {
        let mut value = Value::from(vec![]);
        assert!(value.assign("x").unwrap_err().is_type_mismatch());
        assert_eq!(value.kind(), Kind::Sequence);
    }

    #[test]
    fn test_character_access() {
        let value = Value::from("héllo");
        assert_eq!(value.front().unwrap(), 'h');
        assert_eq!(value.back().unwrap(), 'o');
        assert_eq!(value.at(1).unwrap(), 'é');
        assert!(matches!(
            value.at(2),
            Err(Error::OutOfRange { pos: 2, len: 6 })
        ));
        assert!(value.at(6).is_err());
        assert!(Value::from("").back().is_err());
    }

    #[test]
    fn test_substr_bounds() {
        let value = Value::from("abcdef");
        assert_eq!(value.substr(1..=3).unwrap(), "bcd");
        assert_eq!(value.substr(..).unwrap(), "abcdef");
        assert_eq!(value.substr(6..).unwrap(), "");
        assert!(value.substr(7..).is_err());
        assert!(value.substr(4..2).is_err());
    }

    #[test]
    fn test_searches() {
        let value = Value::from("a.b.c");
        assert_eq!(value.find(".").unwrap(), Some(1));
        assert_eq!(value.rfind(".").unwrap(), Some(3));
        assert_eq!(value.find("x").unwrap(), None);
        assert_eq!(value.find_first_of("cb").unwrap(), Some(2));
        assert_eq!(value.find_first_not_of("a.").unwrap(), Some(2));
        assert_eq!(value.find_last_of("ab").unwrap(), Some(2));
        assert_eq!(value.find_last_not_of("c.").unwrap(), Some(2));
        assert_eq!(value.compare("a.b").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_edits() {
        let mut value = Value::from("world");
        value.insert_str(0, "hello ").unwrap();
        value.push_char('!').unwrap();
        assert_eq!(value.as_str().unwrap(), "hello world!");

        assert_eq!(value.pop_char().unwrap(), Some('!'));
        value.insert_char(5, ',').unwrap();
        assert_eq!(value.as_str().unwrap(), "hello, world");

        value.replace_range(..5, "goodbye").unwrap();
        assert_eq!(value.as_str().unwrap(), "goodbye, world");

        value.truncate(7).unwrap();
        assert_eq!(value.as_str().unwrap(), "goodbye");
        value.truncate(100).unwrap();
        assert_eq!(value.as_str().unwrap(), "goodbye");
    }

    #[test]
    fn test_edits_check_char_boundaries() {
        let mut value = Value::from("é");
        assert!(value.insert_str(1, "x").is_err());
        assert!(value.insert_char(3, 'x').is_err());
        assert!(value.truncate(1).is_err());
        assert!(value.erase(0..1).is_err());
        assert_eq!(value.as_str().unwrap(), "é");
    }
}
