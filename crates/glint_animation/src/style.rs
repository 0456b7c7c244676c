//! Keyframe style values and animation options
//!
//! Keyframes are insertion-ordered maps from style-property name to a
//! string-or-numeric value, handed to the native animation API verbatim.
//! Options are an equally opaque map; only the numeric `duration` and
//! `delay` entries are interpreted by the players themselves.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single style value, either a CSS string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Numeric value (e.g. opacity, unitless offsets)
    Num(f64),
    /// String value (e.g. "100px", "ease-in-out")
    Str(String),
}

impl StyleValue {
    /// Return the numeric value, if this is one
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Return the string value, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Num(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Num(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// One keyframe: style-property name to value, in declaration order
pub type StyleMap = IndexMap<String, StyleValue>;

/// Timing and configuration options for a native animation
///
/// Entries are passed through verbatim to the native animation primitive
/// (duration, easing, delay, iterations, and whatever else the native API
/// accepts). The wrapper only reads `duration` and `delay` to compute the
/// player's total time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationOptions(IndexMap<String, StyleValue>);

impl AnimationOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option (builder pattern)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an option
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up an option by name
    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.0.get(name)
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the option set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric `duration` entry in milliseconds (0.0 when absent)
    pub fn duration(&self) -> f64 {
        self.get("duration").and_then(StyleValue::as_num).unwrap_or(0.0)
    }

    /// Numeric `delay` entry in milliseconds (0.0 when absent)
    pub fn delay(&self) -> f64 {
        self.get("delay").and_then(StyleValue::as_num).unwrap_or(0.0)
    }

    /// Total timeline length: duration plus delay
    pub fn total_time(&self) -> f64 {
        self.duration() + self.delay()
    }
}
