//! Override values and the equality rules applied to them.
//!
//! User overrides are stored as a flat map from dotted path to
//! [`StyleValue`], a closed union of the JSON-compatible shapes an
//! appearance edit can carry. Keeping the union closed (rather than an
//! open dynamic type) means every consumer matches exhaustively and the
//! persistence boundary rejects shapes the engine cannot represent.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::theme::Gradient;

/// A single override or configuration value.
///
/// Deserializes from any JSON value except `NaN`/infinite numbers. Objects
/// shaped like a gradient (`{from, to, angleDegrees}`) parse as
/// [`StyleValue::Gradient`]; all other objects fall through to
/// [`StyleValue::Map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// JSON `null`. Setting a path to null removes the override.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Gradient(Gradient),
    List(Vec<StyleValue>),
    Map(BTreeMap<String, StyleValue>),
}

impl StyleValue {
    /// The string content, if this value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<Gradient> for StyleValue {
    fn from(value: Gradient) -> Self {
        StyleValue::Gradient(value)
    }
}

/// Deserializes a [`StyleValue`] into a concrete field type, bridging
/// through `serde_json`. Returns `None` when the shapes do not line up.
pub(crate) fn coerce<T: DeserializeOwned>(value: &StyleValue) -> Option<T> {
    let json = serde_json::to_value(value).ok()?;
    serde_json::from_value(json).ok()
}

/// Serializes any data-model value into its [`StyleValue`] shape.
pub(crate) fn to_style_value<T: Serialize>(value: &T) -> Option<StyleValue> {
    let json = serde_json::to_value(value).ok()?;
    serde_json::from_value(json).ok()
}

/// Structural equality with gradient awareness.
///
/// Two text values that mention `gradient` are compared by their
/// normalized form, so `linear-gradient(135deg, #667eea 0%, #764ba2 100%)`
/// and `linear-gradient(135deg,#667eea,#764ba2)` are equal. Everything
/// else compares structurally.
pub fn deep_eq(a: &StyleValue, b: &StyleValue) -> bool {
    match (a, b) {
        (StyleValue::Text(x), StyleValue::Text(y)) => {
            if x.contains("gradient") || y.contains("gradient") {
                normalize_gradient(x) == normalize_gradient(y)
            } else {
                x == y
            }
        }
        (StyleValue::Map(x), StyleValue::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| deep_eq(value, other)))
        }
        (StyleValue::List(x), StyleValue::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| deep_eq(v, w))
        }
        (StyleValue::Gradient(g), other @ StyleValue::Map(_))
        | (other @ StyleValue::Map(_), StyleValue::Gradient(g)) => {
            deep_eq(&StyleValue::Map(gradient_fields(g)), other)
        }
        _ => a == b,
    }
}

fn gradient_fields(gradient: &Gradient) -> BTreeMap<String, StyleValue> {
    let mut fields = BTreeMap::new();
    fields.insert("from".to_string(), StyleValue::Text(gradient.from.clone()));
    fields.insert("to".to_string(), StyleValue::Text(gradient.to.clone()));
    fields.insert(
        "angleDegrees".to_string(),
        StyleValue::Number(gradient.angle_degrees as f64),
    );
    fields
}

/// Normalizes a gradient-bearing string to a `type|angle|color1|color2`
/// tuple. Non-gradient strings and gradients with fewer than two
/// extractable colors are returned unchanged.
pub(crate) fn normalize_gradient(value: &str) -> String {
    if !value.contains("gradient") {
        return value.to_string();
    }
    let colors = crate::color::extract_colors(value);
    if colors.len() < 2 {
        return value.to_string();
    }
    let radial = value.contains("radial-gradient");
    let kind = if radial { "radial" } else { "linear" };
    let angle = if radial {
        135
    } else {
        crate::color::extract_angle(value).unwrap_or(135)
    };
    format!("{kind}|{angle}|{}|{}", colors[0], colors[1])
}
