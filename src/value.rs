//! The TOPS value tree.
//!
//! This module provides [`Value`], one node of a TOPS document tree. A value
//! holds a [`Node`] payload, which is one of:
//!
//! - [`Node::Empty`]: nothing assigned yet (the default)
//! - [`Node::Scalar`]: a text string
//! - [`Node::Sequence`]: an ordered list of child values
//! - [`Node::Mapping`]: an insertion-ordered [`Mapping`] of child values
//!
//! plus an optional *name*, a diagnostic label used in error messages. Names
//! never take part in equality.
//!
//! ## Variant Fixation
//!
//! A fresh value is [`Node::Empty`]. The first write through a typed accessor
//! fixes the variant; from then on, writing through an accessor of another
//! variant is a [`TypeMismatch`](crate::Error::TypeMismatch):
//!
//! ```rust
//! use tops::{Kind, Value};
//!
//! let mut value = Value::new();
//! assert_eq!(value.kind(), Kind::Empty);
//!
//! value.as_scalar_mut().unwrap().push_str("hello");
//! assert_eq!(value.kind(), Kind::Scalar);
//!
//! assert!(value.as_sequence_mut().is_err());
//! assert_eq!(value.as_str().unwrap(), "hello");
//! ```
//!
//! Reading never fixes a variant. Typed reads require the matching variant:
//!
//! ```rust
//! use tops::Value;
//!
//! let value = Value::new();
//! assert!(value.as_str().is_err());
//! assert!(value.is_empty());
//! ```
//!
//! ## Building Trees
//!
//! ```rust
//! use tops::Value;
//!
//! let mut root = Value::new();
//! root.insert("host", Value::from("localhost")).unwrap();
//! let ports = root.as_mapping_mut().unwrap().entry("ports");
//! ports.push(Value::from("80")).unwrap();
//! ports.push(Value::from("443")).unwrap();
//!
//! assert_eq!(root.to_string(), "host: localhost\nports:\n  - 80\n  - 443\n");
//! ```

use crate::error::{Error, Result};
use crate::options::PrintOptions;
use crate::ser::Printer;
use crate::Mapping;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The variant tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Empty,
    Scalar,
    Sequence,
    Mapping,
}

impl Kind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Empty => "empty",
            Kind::Scalar => "scalar",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of a [`Value`].
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Scalar(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Node {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Node::Empty => Kind::Empty,
            Node::Scalar(_) => Kind::Scalar,
            Node::Sequence(_) => Kind::Sequence,
            Node::Mapping(_) => Kind::Mapping,
        }
    }
}

/// One node of a TOPS document tree.
///
/// Values own their children outright, so a tree is acyclic by
/// construction and dropping a value drops its whole subtree.
///
/// # Examples
///
/// ```rust
/// use tops::{parse_document, Value};
///
/// let doc = parse_document("name: tops\ntags:\n  - config\n  - format\n").unwrap();
///
/// assert_eq!(doc.get("name").unwrap().as_str().unwrap(), "tops");
/// let tags = doc.get("tags").unwrap().as_sequence().unwrap();
/// assert_eq!(tags, &[Value::from("config"), Value::from("format")]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Value {
    name: Option<String>,
    node: Node,
}

impl Value {
    /// Creates an empty, unnamed value.
    #[must_use]
    pub const fn new() -> Self {
        Value {
            name: None,
            node: Node::Empty,
        }
    }

    /// Creates an empty value carrying `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Value::new().with_name(name)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.node.kind()
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn into_node(mut self) -> Node {
        std::mem::take(&mut self.node)
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    /// Returns `true` if no variant has been fixed yet.
    ///
    /// A scalar holding `""` or a container with no children is *not* empty
    /// in this sense.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.node, Node::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.node, Node::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self.node, Node::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.node, Node::Mapping(_))
    }

    fn mismatch(&self, expected: Kind) -> Error {
        Error::type_mismatch(self.name(), expected, self.kind())
    }

    /// Returns the scalar text, fixing an empty value as a scalar first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a sequence or mapping.
    pub fn as_scalar_mut(&mut self) -> Result<&mut String> {
        if self.is_empty() {
            self.node = Node::Scalar(String::new());
        }
        match &mut self.node {
            Node::Scalar(text) => Ok(text),
            node => Err(Error::type_mismatch(
                self.name.as_deref(),
                Kind::Scalar,
                node.kind(),
            )),
        }
    }

    /// Returns the child list, fixing an empty value as a sequence first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a scalar or mapping.
    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Value>> {
        if self.is_empty() {
            self.node = Node::Sequence(Vec::new());
        }
        match &mut self.node {
            Node::Sequence(items) => Ok(items),
            node => Err(Error::type_mismatch(
                self.name.as_deref(),
                Kind::Sequence,
                node.kind(),
            )),
        }
    }

    /// Returns the child map, fixing an empty value as a mapping first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a scalar or sequence.
    pub fn as_mapping_mut(&mut self) -> Result<&mut Mapping> {
        if self.is_empty() {
            self.node = Node::Mapping(Mapping::new());
        }
        match &mut self.node {
            Node::Mapping(map) => Ok(map),
            node => Err(Error::type_mismatch(
                self.name.as_deref(),
                Kind::Mapping,
                node.kind(),
            )),
        }
    }

    /// Returns the scalar text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the value is a scalar.
    pub fn as_str(&self) -> Result<&str> {
        match &self.node {
            Node::Scalar(text) => Ok(text),
            _ => Err(self.mismatch(Kind::Scalar)),
        }
    }

    /// Returns the child list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the value is a sequence.
    pub fn as_sequence(&self) -> Result<&[Value]> {
        match &self.node {
            Node::Sequence(items) => Ok(items),
            _ => Err(self.mismatch(Kind::Sequence)),
        }
    }

    /// Returns the child map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the value is a mapping.
    pub fn as_mapping(&self) -> Result<&Mapping> {
        match &self.node {
            Node::Mapping(map) => Ok(map),
            _ => Err(self.mismatch(Kind::Mapping)),
        }
    }

    /// Looks up `key` if this value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.node {
            Node::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match &mut self.node {
            Node::Mapping(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Returns the element at `index` if this value is a sequence.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match &self.node {
            Node::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Appends an element, fixing an empty value as a sequence first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a scalar or mapping.
    pub fn push(&mut self, value: Value) -> Result<()> {
        self.as_sequence_mut()?.push(value);
        Ok(())
    }

    /// Inserts an entry named after its key, fixing an empty value as a
    /// mapping first. An existing key is overwritten in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is a scalar or sequence.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<Option<Value>> {
        let value = match value.name {
            Some(_) => value,
            None => value.with_name(key),
        };
        Ok(self.as_mapping_mut()?.insert(key.to_string(), value))
    }

    /// Empties the payload without changing the fixed variant.
    pub fn clear(&mut self) {
        match &mut self.node {
            Node::Empty => {}
            Node::Scalar(text) => text.clear(),
            Node::Sequence(items) => items.clear(),
            Node::Mapping(map) => map.clear(),
        }
    }

    /// Writes this subtree in canonical TOPS syntax, starting at
    /// `indent_level` levels of indentation.
    ///
    /// Re-parsing the output yields a tree equal to this one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::tops;
    ///
    /// let value = tops!({ "server": { "host": "localhost" } });
    /// let mut out = String::new();
    /// value.pretty_print(&mut out, 1).unwrap();
    /// assert_eq!(out, "  server:\n    host: localhost\n");
    /// ```
    pub fn pretty_print<W: fmt::Write>(&self, out: &mut W, indent_level: usize) -> fmt::Result {
        self.pretty_print_with(out, indent_level, &PrintOptions::default())
    }

    /// Like [`Value::pretty_print`] with explicit [`PrintOptions`].
    pub fn pretty_print_with<W: fmt::Write>(
        &self,
        out: &mut W,
        indent_level: usize,
        options: &PrintOptions,
    ) -> fmt::Result {
        Printer::new(out, options).print(self, indent_level)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

// Deep trees are torn down from an explicit worklist instead of through
// recursive drop glue, which would overflow the stack.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match &mut self.node {
            Node::Sequence(items) => std::mem::take(items),
            Node::Mapping(map) => std::mem::take(map).into_iter().map(|(_, v)| v).collect(),
            Node::Empty | Node::Scalar(_) => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value.node {
                Node::Sequence(items) => pending.append(items),
                Node::Mapping(map) => {
                    pending.extend(std::mem::take(map).into_iter().map(|(_, v)| v));
                }
                Node::Empty | Node::Scalar(_) => {}
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pretty_print(f, 0)
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_document(s)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.node {
            Node::Empty => serializer.serialize_unit(),
            Node::Scalar(text) => serializer.serialize_str(text),
            Node::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut entries = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    entries.serialize_entry(k, v)?;
                }
                entries.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOPS value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::from(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::from(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::from(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::from(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::new())
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::new())
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::from(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = Mapping::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    let value = value.with_name(key.as_str());
                    entries.insert(key, value);
                }
                Ok(Value::from(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value {
            name: None,
            node: Node::Scalar(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value {
            name: None,
            node: Node::Sequence(value),
        }
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value {
            name: None,
            node: Node::Mapping(value),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value { name: None, node }
    }
}
