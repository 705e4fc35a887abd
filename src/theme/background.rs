//! Background tokens: solid colors, gradients, and their CSS forms.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{extract_angle, extract_hex_colors};

/// Default gradient angle when a gradient string carries none.
pub const DEFAULT_GRADIENT_ANGLE: f32 = 135.0;

/// A two-stop linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub from: String,
    pub to: String,
    pub angle_degrees: f32,
}

impl Gradient {
    /// Renders the gradient as a CSS `linear-gradient` value.
    ///
    /// The format is fixed so the same gradient always round-trips to the
    /// same string.
    pub fn css(&self) -> String {
        format!(
            "linear-gradient({}deg, {}, {})",
            self.angle_degrees, self.from, self.to
        )
    }
}

/// A page background: a plain color value or a gradient.
///
/// The color arm also carries decorative pattern declarations: a value
/// beginning with `background:` is a complete CSS declaration and is passed
/// through verbatim by [`Background::css`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Background {
    Color(String),
    Gradient(Gradient),
}

impl Background {
    /// Convenience constructor for a solid color background.
    pub fn solid(value: impl Into<String>) -> Background {
        Background::Color(value.into())
    }

    /// Convenience constructor for a gradient background.
    pub fn gradient(from: impl Into<String>, to: impl Into<String>, angle_degrees: f32) -> Background {
        Background::Gradient(Gradient {
            from: from.into(),
            to: to.into(),
            angle_degrees,
        })
    }

    /// The CSS value for this background.
    pub fn css(&self) -> String {
        match self {
            Background::Color(value) => value.clone(),
            Background::Gradient(gradient) => gradient.css(),
        }
    }

    /// Interprets a user-supplied background string.
    ///
    /// Any value mentioning `gradient` is parsed by extracting its first
    /// two hex colors and an optional `<N>deg` angle (135° when absent).
    /// A gradient string with fewer than two extractable colors degrades
    /// to a plain color token holding the raw string, so a malformed edit
    /// still renders something.
    pub fn from_css(value: &str) -> Background {
        if value.contains("gradient") {
            let colors = extract_hex_colors(value);
            if colors.len() >= 2 {
                let angle = extract_angle(value)
                    .map(|a| a as f32)
                    .unwrap_or(DEFAULT_GRADIENT_ANGLE);
                return Background::Gradient(Gradient {
                    from: colors[0].clone(),
                    to: colors[1].clone(),
                    angle_degrees: angle,
                });
            }
            warn!(value, "gradient string without two hex colors, keeping raw value");
        }
        Background::Color(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_css_round_trip() {
        let background = Background::gradient("#667eea", "#764ba2", 135.0);
        assert_eq!(background.css(), "linear-gradient(135deg, #667eea, #764ba2)");
        assert_eq!(Background::from_css(&background.css()), background);
    }

    #[test]
    fn test_color_css_is_verbatim() {
        assert_eq!(Background::solid("#1a1a1a").css(), "#1a1a1a");

        let pattern = "background: radial-gradient(circle, #fff 1px, transparent 1px)";
        assert_eq!(Background::solid(pattern).css(), pattern);
    }

    #[test]
    fn test_from_css_plain_color() {
        assert_eq!(Background::from_css("#ffffff"), Background::solid("#ffffff"));
    }

    #[test]
    fn test_from_css_defaults_angle() {
        let background = Background::from_css("linear-gradient(#667eea, #764ba2)");
        assert_eq!(background, Background::gradient("#667eea", "#764ba2", 135.0));
    }

    #[test]
    fn test_from_css_degrades_malformed_gradient() {
        let raw = "linear-gradient(#667eea)";
        assert_eq!(Background::from_css(raw), Background::solid(raw));
    }

    #[test]
    fn test_serde_shape() {
        let color: Background = serde_json::from_str(r##"{"kind": "color", "value": "#fff"}"##).unwrap();
        assert_eq!(color, Background::solid("#fff"));

        let gradient: Background = serde_json::from_str(
            r##"{"kind": "gradient", "value": {"from": "#667eea", "to": "#764ba2", "angleDegrees": 90}}"##,
        )
        .unwrap();
        assert_eq!(gradient, Background::gradient("#667eea", "#764ba2", 90.0));

        let json = serde_json::to_string(&Background::solid("#fff")).unwrap();
        assert_eq!(json, r##"{"kind":"color","value":"#fff"}"##);
    }
}
