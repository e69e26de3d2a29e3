//! Setting values
//!
//! Closed sum type over everything a settings tree can hold. Nested mappings are
//! owned by their parent value, so a tree can never contain itself.

mod complex;

pub use complex::Complex;

use crate::error::SettingsError;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Nested key/value mapping holding an application's settings.
///
/// Keys are case-sensitive. A `BTreeMap` keeps rendering deterministic; lookups
/// never depend on position.
pub type SettingsTree = BTreeMap<String, SettingValue>;

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex),
    Str(String),
    Tree(SettingsTree),
}

/// Discriminant of a [`SettingValue`], used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Null,
    Bool,
    Int,
    Float,
    Complex,
    Str,
    Tree,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKind::Null => "null",
            SettingKind::Bool => "bool",
            SettingKind::Int => "int",
            SettingKind::Float => "float",
            SettingKind::Complex => "complex",
            SettingKind::Str => "string",
            SettingKind::Tree => "tree",
        };
        f.write_str(name)
    }
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Null => SettingKind::Null,
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Complex(_) => SettingKind::Complex,
            SettingValue::Str(_) => SettingKind::Str,
            SettingValue::Tree(_) => SettingKind::Tree,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of integers and floats. Complex values have no real view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Int(i) => Some(*i as f64),
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex> {
        match self {
            SettingValue::Complex(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&SettingsTree> {
        match self {
            SettingValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut SettingsTree> {
        match self {
            SettingValue::Tree(t) => Some(t),
            _ => None,
        }
    }
}

/// Resolve a dotted path (`db.port`) against a tree.
///
/// Each segment descends one level; the lookup fails as soon as a segment is
/// missing or the current value is not a tree. Keys containing dots are only
/// reachable through direct map access.
pub fn lookup_path<'a>(tree: &'a SettingsTree, path: &str) -> Option<&'a SettingValue> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = tree.get(first)?;
    for segment in segments {
        current = current.as_tree()?.get(segment)?;
    }
    Some(current)
}

/// Parse a TOML document into a settings tree.
pub fn tree_from_toml_str(text: &str) -> Result<SettingsTree, SettingsError> {
    Ok(toml::from_str(text)?)
}

/// Parse a JSON object into a settings tree.
pub fn tree_from_json_str(text: &str) -> Result<SettingsTree, SettingsError> {
    Ok(serde_json::from_str(text)?)
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Null => f.write_str("null"),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional marker: 3.0 renders as "3.0", not "3".
            SettingValue::Float(x) => write!(f, "{:?}", x),
            SettingValue::Complex(c) => write!(f, "{}", c),
            SettingValue::Str(s) => f.write_str(s),
            SettingValue::Tree(t) => {
                let rendered = serde_json::to_string(t).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<Complex> for SettingValue {
    fn from(value: Complex) -> Self {
        SettingValue::Complex(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<SettingsTree> for SettingValue {
    fn from(value: SettingsTree) -> Self {
        SettingValue::Tree(value)
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SettingValue::Null)
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Null => serializer.serialize_unit(),
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Int(i) => serializer.serialize_i64(*i),
            SettingValue::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            // JSON would turn these into null; keep them distinguishable.
            SettingValue::Float(x) => serializer.collect_str(&format_args!("{:?}", x)),
            // No JSON/TOML counterpart; emit the literal form the coercer accepts.
            SettingValue::Complex(c) => serializer.collect_str(c),
            SettingValue::Str(s) => serializer.serialize_str(s),
            SettingValue::Tree(t) => t.serialize(serializer),
        }
    }
}

struct SettingValueVisitor;

impl<'de> Visitor<'de> for SettingValueVisitor {
    type Value = SettingValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number, a string or a table of settings")
    }

    fn visit_unit<E: de::Error>(self) -> Result<SettingValue, E> {
        Ok(SettingValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<SettingValue, E> {
        Ok(SettingValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<SettingValue, D::Error> {
        SettingValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<SettingValue, E> {
        Ok(SettingValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<SettingValue, E> {
        Ok(SettingValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<SettingValue, E> {
        i64::try_from(value)
            .map(SettingValue::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &"an integer within i64 range"))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<SettingValue, E> {
        Ok(SettingValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<SettingValue, E> {
        Ok(SettingValue::Str(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<SettingValue, E> {
        Ok(SettingValue::Str(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> Result<SettingValue, A::Error> {
        Err(de::Error::custom("arrays are not supported in settings trees"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SettingValue, A::Error> {
        let mut tree = SettingsTree::new();
        while let Some((key, value)) = map.next_entry::<String, SettingValue>()? {
            tree.insert(key, value);
        }
        Ok(SettingValue::Tree(tree))
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SettingValueVisitor)
    }
}
