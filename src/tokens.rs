//! Token references and the expanded token set.
//!
//! A token reference is a token name with an optional opacity suffix:
//! `blockBase`, `blockBase@0.14`. The literals `transparent` and `none`
//! pass straight through. References resolve against a [`TokenSet`], the
//! render-ready expansion of a theme's configured tokens.

use serde::Serialize;
use tracing::warn;

use crate::color::{self, FALLBACK_COLOR};
use crate::theme::{Background, ColorMode, ThemeConfig};

/// A parsed token reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenRef<'a> {
    pub token: &'a str,
    pub opacity: f64,
}

/// Splits a reference into token name and opacity.
///
/// The opacity defaults to 1 when absent or unparseable and is clamped to
/// `[0, 1]`. `transparent` and `none` are returned whole.
///
/// # Example
///
/// ```rust
/// use veneer::tokens::parse_reference;
///
/// let parsed = parse_reference("blockBase@0.14");
/// assert_eq!(parsed.token, "blockBase");
/// assert_eq!(parsed.opacity, 0.14);
/// ```
pub fn parse_reference(reference: &str) -> TokenRef<'_> {
    if reference == "transparent" || reference == "none" {
        return TokenRef {
            token: reference,
            opacity: 1.0,
        };
    }
    match reference.split_once('@') {
        Some((token, raw)) => TokenRef {
            token,
            opacity: raw.parse::<f64>().map(|o| o.clamp(0.0, 1.0)).unwrap_or(1.0),
        },
        None => TokenRef {
            token: reference,
            opacity: 1.0,
        },
    }
}

/// Shadow elevation bucket derived from the page density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowLevel {
    None,
    Sm,
    Md,
    Lg,
}

/// The full token set consumed by rendering.
///
/// Carries the configured base tokens plus the derived values computed
/// during resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub bg: Background,
    pub text: String,
    pub primary: String,
    pub surface: String,
    pub border: String,
    pub block_base: String,
    pub font_family: String,
    /// `primary` darkened 20%.
    pub secondary: String,
    /// `text` pulled 30% toward the background's brightness.
    pub text_secondary: String,
    pub shadow_level: ShadowLevel,
    /// Flat CSS background value for renderers that predate the token
    /// model: gradients render as `linear-gradient(...)`, and a value
    /// already carrying a `background:` declaration passes through
    /// verbatim.
    pub background_color: String,
}

impl TokenSet {
    /// Expands a merged theme config into the render-ready token set.
    ///
    /// If the config declares a token variant for its own color mode, the
    /// variant overlays the base tokens before derived colors are
    /// computed.
    pub fn expand(config: &ThemeConfig) -> TokenSet {
        let mut tokens = config.tokens.clone();
        if let Some(variant) = config
            .modes
            .as_ref()
            .and_then(|modes| modes.variant(config.page.mode))
        {
            variant.tokens.apply_to(&mut tokens);
        }

        let dark = config.page.mode == ColorMode::Dark;
        let secondary = color::adjust(&tokens.primary, -20);
        let text_secondary = color::adjust(&tokens.text, if dark { -30 } else { 30 });
        let shadow_level = if config.page.layout.page_padding <= 18 {
            ShadowLevel::Sm
        } else {
            ShadowLevel::Md
        };
        let background_color = tokens.bg.css();

        TokenSet {
            bg: tokens.bg,
            text: tokens.text,
            primary: tokens.primary,
            surface: tokens.surface,
            border: tokens.border,
            block_base: tokens.block_base,
            font_family: tokens.font_family,
            secondary,
            text_secondary,
            shadow_level,
            background_color,
        }
    }

    /// Looks a color token up by its reference name.
    pub fn color(&self, token: &str) -> Option<&str> {
        match token {
            "text" => Some(&self.text),
            "primary" => Some(&self.primary),
            "surface" => Some(&self.surface),
            "border" => Some(&self.border),
            "blockBase" => Some(&self.block_base),
            "secondary" => Some(&self.secondary),
            "textSecondary" => Some(&self.text_secondary),
            _ => None,
        }
    }
}

/// Resolves a token reference to a concrete CSS color.
///
/// A miss resolves to black rather than failing. At full opacity the token
/// value is returned unchanged, which keeps gradients and pattern strings
/// intact. With reduced opacity, `rgb`/`rgba` values get their alpha
/// channel rewritten and hex colors convert to `rgba(...)`; any other
/// shape is returned unchanged because opacity cannot be applied safely.
///
/// # Example
///
/// ```rust
/// use veneer::theme::ThemeConfig;
/// use veneer::tokens::{resolve, TokenSet};
///
/// let tokens = TokenSet::expand(&ThemeConfig::default());
/// assert_eq!(resolve("primary", &tokens), "#3b82f6");
/// assert_eq!(resolve("primary@0.5", &tokens), "rgba(59, 130, 246, 0.5)");
/// ```
pub fn resolve(reference: &str, tokens: &TokenSet) -> String {
    let TokenRef { token, opacity } = parse_reference(reference);
    if token == "transparent" || token == "none" {
        return token.to_string();
    }
    let Some(value) = tokens.color(token) else {
        warn!(token, "token not found, using fallback");
        return FALLBACK_COLOR.to_string();
    };
    if opacity >= 1.0 {
        return value.to_string();
    }
    if value.starts_with("rgba(") || value.starts_with("rgb(") {
        if let Some((r, g, b)) = parse_rgb_prefix(value) {
            return format!("rgba({r}, {g}, {b}, {opacity})");
        }
        return value.to_string();
    }
    color::hex_to_rgba(value, opacity).unwrap_or_else(|| value.to_string())
}

/// Picks the text color for the literal `auto` reference.
///
/// Transparent fills and alpha-blended fills have no known backdrop, so
/// they fall back to the theme's plain text color; opaque hex fills get a
/// black-or-white contrast pick.
pub fn resolve_auto_text(fill_ref: &str, tokens: &TokenSet) -> String {
    if fill_ref == "transparent" {
        return tokens.text.clone();
    }
    let fill = resolve(fill_ref, tokens);
    if fill.starts_with("rgba") {
        return tokens.text.clone();
    }
    match color::contrast_text(&fill) {
        Some(text) => text.to_string(),
        None => tokens.text.clone(),
    }
}

/// Rewrites the color of a hard shadow, leaving soft shadows untouched.
pub fn resolve_shadow(shadow: Option<&str>, shadow_color: &str) -> String {
    match shadow {
        None | Some("none") => "none".to_string(),
        Some(raw) if raw.contains("4px 4px 0px") => format!("4px 4px 0px {shadow_color}"),
        Some(raw) => raw.to_string(),
    }
}

fn parse_rgb_prefix(value: &str) -> Option<(u8, u8, u8)> {
    let open = value.find('(')?;
    let inner = value.get(open + 1..)?;
    let inner = inner.split(')').next()?;
    let mut channels = inner.split(',').map(str::trim);
    let r = channels.next()?.parse().ok()?;
    let g = channels.next()?.parse().ok()?;
    let b = channels.next()?.parse().ok()?;
    Some((r, g, b))
}
