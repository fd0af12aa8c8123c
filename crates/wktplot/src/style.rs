//! Style attributes forwarded verbatim from callers to renderers.
//!
//! The mapper never inspects or edits a `Style`; only renderers interpret it.
//! Order of insertion is kept so output is stable.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// RGB color with optional alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, f64)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Rgba::rgba(r, g, b, a)
    }
}

/// Closed set of primitive style values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Color(Rgba),
    Bool(bool),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Parse a `key=value` command-line value: bool, then number, then text.
    pub fn parse_loose(raw: &str) -> Self {
        match raw {
            "true" => return StyleValue::Bool(true),
            "false" => return StyleValue::Bool(false),
            _ => {}
        }
        raw.parse::<f64>()
            .map(StyleValue::Number)
            .unwrap_or_else(|_| StyleValue::Text(raw.to_string()))
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}
impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Number(v as f64)
    }
}
impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}
impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}
impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}
impl From<Rgba> for StyleValue {
    fn from(v: Rgba) -> Self {
        StyleValue::Color(v)
    }
}
impl From<(u8, u8, u8)> for StyleValue {
    fn from(v: (u8, u8, u8)) -> Self {
        StyleValue::Color(v.into())
    }
}
impl From<(u8, u8, u8, f64)> for StyleValue {
    fn from(v: (u8, u8, u8, f64)) -> Self {
        StyleValue::Color(v.into())
    }
}

/// Ordered `name -> value` attributes. Setting an existing name replaces its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, StyleValue)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (k, v) in iter {
            style.set(k, v);
        }
        style
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
