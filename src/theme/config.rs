//! The theme configuration tree and its override plumbing.
//!
//! A [`ThemeConfig`] is the typed form of the JSON document a theme ships
//! with: metadata, design tokens, default preset ids and page layout.
//! Theme-level user overrides address this tree by dotted path
//! (`tokens.text`, `page.layout.maxWidth`); [`ThemeConfig::apply_override`]
//! walks the path with an explicit recursive descent, and
//! [`ThemeConfig::value_at`] performs the matching read. Keys the schema
//! does not know (for example `backgroundVideo`) are preserved in a
//! flattened side map instead of being dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::presets::{DEFAULT_BLOCK_PRESET, DEFAULT_BLOCK_STYLE, DEFAULT_HEADER_PRESET};
use crate::theme::Background;
use crate::value::{coerce, to_style_value, StyleValue};

/// Theme identity and schema metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeMeta {
    pub id: String,
    pub name: String,
    pub schema_version: u32,
    pub version: String,
}

/// The design tokens a theme defines.
///
/// Every field has a fixed built-in default, so a sparse token block still
/// decodes into a fully usable set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigTokens {
    pub bg: Background,
    pub text: String,
    pub primary: String,
    pub surface: String,
    pub border: String,
    pub block_base: String,
    pub font_family: String,
}

impl Default for ConfigTokens {
    fn default() -> Self {
        Self {
            bg: Background::solid("#ffffff"),
            text: "#000000".to_string(),
            primary: "#3b82f6".to_string(),
            surface: "#f8fafc".to_string(),
            border: "#e2e8f0".to_string(),
            block_base: "#3b82f6".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

impl ConfigTokens {
    fn apply(&mut self, path: &str, value: &StyleValue) {
        match path {
            "bg" => match value {
                StyleValue::Text(css) => self.bg = Background::from_css(css),
                StyleValue::Gradient(gradient) => self.bg = Background::Gradient(gradient.clone()),
                other => match coerce::<Background>(other) {
                    Some(background) => self.bg = background,
                    None => warn!(path, "background override has an unusable shape"),
                },
            },
            "text" => apply_text(&mut self.text, path, value),
            "primary" => apply_text(&mut self.primary, path, value),
            "surface" => apply_text(&mut self.surface, path, value),
            "border" => apply_text(&mut self.border, path, value),
            "blockBase" => apply_text(&mut self.block_base, path, value),
            "fontFamily" => apply_text(&mut self.font_family, path, value),
            _ => warn!(path, "unknown token override"),
        }
    }
}

/// Default sub-preset ids declared by a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDefaults {
    pub header_preset: String,
    pub block_preset: String,
    pub block_style_preset: String,
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self {
            header_preset: DEFAULT_HEADER_PRESET.to_string(),
            block_preset: DEFAULT_BLOCK_PRESET.to_string(),
            block_style_preset: DEFAULT_BLOCK_STYLE.to_string(),
        }
    }
}

impl ThemeDefaults {
    fn apply(&mut self, path: &str, value: &StyleValue) {
        match path {
            "headerPreset" => apply_text(&mut self.header_preset, path, value),
            "blockPreset" => apply_text(&mut self.block_preset, path, value),
            "blockStylePreset" => apply_text(&mut self.block_style_preset, path, value),
            _ => warn!(path, "unknown defaults override"),
        }
    }
}

/// Whether a theme renders as a light or a dark surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Page-level layout values, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageLayout {
    pub max_width: u32,
    pub page_padding: u32,
    pub block_gap: u32,
    pub text_align: TextAlign,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            max_width: 680,
            page_padding: 16,
            block_gap: 12,
            text_align: TextAlign::Center,
        }
    }
}

impl PageLayout {
    fn apply(&mut self, path: &str, value: &StyleValue) {
        match path {
            "maxWidth" => apply_px(&mut self.max_width, path, value),
            "pagePadding" => apply_px(&mut self.page_padding, path, value),
            "blockGap" => apply_px(&mut self.block_gap, path, value),
            "textAlign" => match coerce::<TextAlign>(value) {
                Some(align) => self.text_align = align,
                None => warn!(path, "expected left, center or right"),
            },
            _ => warn!(path, "unknown layout override"),
        }
    }
}

/// The page block of a theme config: color mode plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub mode: ColorMode,
    pub layout: PageLayout,
}

impl PageSettings {
    fn apply(&mut self, path: &str, value: &StyleValue) {
        let (head, rest) = split_path(path);
        match (head, rest) {
            ("mode", None) => match coerce::<ColorMode>(value) {
                Some(mode) => self.mode = mode,
                None => warn!(path, "expected light or dark"),
            },
            ("layout", Some(rest)) => self.layout.apply(rest, value),
            _ => warn!(path, "unknown page override"),
        }
    }
}

/// Partial token set used by per-mode variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenOverlay {
    pub bg: Option<Background>,
    pub text: Option<String>,
    pub primary: Option<String>,
    pub surface: Option<String>,
    pub border: Option<String>,
    pub block_base: Option<String>,
    pub font_family: Option<String>,
}

impl TokenOverlay {
    /// Writes every declared token over the base set.
    pub fn apply_to(&self, tokens: &mut ConfigTokens) {
        if let Some(bg) = &self.bg {
            tokens.bg = bg.clone();
        }
        if let Some(text) = &self.text {
            tokens.text = text.clone();
        }
        if let Some(primary) = &self.primary {
            tokens.primary = primary.clone();
        }
        if let Some(surface) = &self.surface {
            tokens.surface = surface.clone();
        }
        if let Some(border) = &self.border {
            tokens.border = border.clone();
        }
        if let Some(block_base) = &self.block_base {
            tokens.block_base = block_base.clone();
        }
        if let Some(font_family) = &self.font_family {
            tokens.font_family = font_family.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModeVariant {
    pub tokens: TokenOverlay,
}

/// Optional per-mode token variants a theme may declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModeVariants {
    pub light: Option<ModeVariant>,
    pub dark: Option<ModeVariant>,
}

impl ModeVariants {
    pub fn variant(&self, mode: ColorMode) -> Option<&ModeVariant> {
        match mode {
            ColorMode::Light => self.light.as_ref(),
            ColorMode::Dark => self.dark.as_ref(),
        }
    }
}

/// A theme's full configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub meta: ThemeMeta,
    pub tokens: ConfigTokens,
    pub defaults: ThemeDefaults,
    pub page: PageSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<ModeVariants>,
    /// Keys outside the schema (for example `backgroundVideo`), preserved
    /// verbatim for the renderer.
    #[serde(flatten)]
    pub extra: BTreeMap<String, StyleValue>,
}

impl ThemeConfig {
    /// Writes one dotted-path override into the tree.
    ///
    /// `backgroundColor` is the historical flat alias for the background
    /// token and is interpreted as a CSS background string. Paths under
    /// `tokens.`, `defaults.` and `page.` descend into the typed tree;
    /// everything else lands in [`ThemeConfig::extra`], creating
    /// intermediate maps as needed.
    pub fn apply_override(&mut self, path: &str, value: &StyleValue) {
        if path == "backgroundColor" {
            match value {
                StyleValue::Text(css) => self.tokens.bg = Background::from_css(css),
                StyleValue::Gradient(gradient) => {
                    self.tokens.bg = Background::Gradient(gradient.clone())
                }
                _ => warn!(path, "background override is not a string"),
            }
            return;
        }
        let (head, rest) = split_path(path);
        match (head, rest) {
            ("tokens", Some(rest)) => self.tokens.apply(rest, value),
            ("defaults", Some(rest)) => self.defaults.apply(rest, value),
            ("page", Some(rest)) => self.page.apply(rest, value),
            ("meta", Some(_)) => warn!(path, "theme metadata is not overridable"),
            _ => write_extra(&mut self.extra, path, value),
        }
    }

    /// Reads the value at a dotted path, or `None` when the path does not
    /// exist in this config.
    pub fn value_at(&self, path: &str) -> Option<StyleValue> {
        let tree = to_style_value(self)?;
        let mut current = tree;
        for segment in path.split('.') {
            match current {
                StyleValue::Map(mut map) => current = map.remove(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

fn apply_text(slot: &mut String, path: &str, value: &StyleValue) {
    match value.as_str() {
        Some(text) => *slot = text.to_string(),
        None => warn!(path, "expected a string value"),
    }
}

fn apply_px(slot: &mut u32, path: &str, value: &StyleValue) {
    match value.as_f64() {
        Some(px) if px >= 0.0 => *slot = px.round() as u32,
        _ => warn!(path, "expected a non-negative number"),
    }
}

fn write_extra(extra: &mut BTreeMap<String, StyleValue>, path: &str, value: &StyleValue) {
    match path.split_once('.') {
        None => {
            extra.insert(path.to_string(), value.clone());
        }
        Some((head, rest)) => {
            let slot = extra
                .entry(head.to_string())
                .or_insert_with(|| StyleValue::Map(BTreeMap::new()));
            if !matches!(slot, StyleValue::Map(_)) {
                *slot = StyleValue::Map(BTreeMap::new());
            }
            if let StyleValue::Map(inner) = slot {
                write_extra(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> StyleValue {
        StyleValue::Text(value.to_string())
    }

    #[test]
    fn test_sparse_tokens_decode_with_defaults() {
        let config: ThemeConfig =
            serde_json::from_str(r##"{"tokens": {"text": "#222222"}}"##).unwrap();
        assert_eq!(config.tokens.text, "#222222");
        assert_eq!(config.tokens.primary, "#3b82f6");
        assert_eq!(config.tokens.bg, Background::solid("#ffffff"));
        assert_eq!(config.defaults.header_preset, "no-cover");
        assert_eq!(config.page.layout.max_width, 680);
    }

    #[test]
    fn test_apply_override_typed_paths() {
        let mut config = ThemeConfig::default();
        config.apply_override("tokens.text", &text("#111111"));
        config.apply_override("page.layout.maxWidth", &StyleValue::Number(720.0));
        config.apply_override("page.mode", &text("dark"));
        config.apply_override("defaults.blockStylePreset", &text("neon"));

        assert_eq!(config.tokens.text, "#111111");
        assert_eq!(config.page.layout.max_width, 720);
        assert_eq!(config.page.mode, ColorMode::Dark);
        assert_eq!(config.defaults.block_style_preset, "neon");
    }

    #[test]
    fn test_apply_background_color_gradient() {
        let mut config = ThemeConfig::default();
        config.apply_override(
            "backgroundColor",
            &text("linear-gradient(90deg, #667eea 0%, #764ba2 100%)"),
        );
        assert_eq!(config.tokens.bg, Background::gradient("#667eea", "#764ba2", 90.0));
    }

    #[test]
    fn test_apply_background_color_malformed_gradient() {
        let mut config = ThemeConfig::default();
        config.apply_override("backgroundColor", &text("linear-gradient(oops)"));
        assert_eq!(config.tokens.bg, Background::solid("linear-gradient(oops)"));
    }

    #[test]
    fn test_apply_override_bad_value_keeps_base() {
        let mut config = ThemeConfig::default();
        config.apply_override("tokens.text", &StyleValue::Number(7.0));
        config.apply_override("page.layout.maxWidth", &text("wide"));
        assert_eq!(config.tokens.text, "#000000");
        assert_eq!(config.page.layout.max_width, 680);
    }

    #[test]
    fn test_unknown_keys_land_in_extra() {
        let mut config = ThemeConfig::default();
        config.apply_override("backgroundVideo", &text("intro.mp4"));
        config.apply_override("effects.parallax.depth", &StyleValue::Number(3.0));

        assert_eq!(config.extra.get("backgroundVideo"), Some(&text("intro.mp4")));
        assert_eq!(
            config.value_at("effects.parallax.depth"),
            Some(StyleValue::Number(3.0))
        );
    }

    #[test]
    fn test_value_at_typed_paths() {
        let config = ThemeConfig::default();
        assert_eq!(config.value_at("tokens.text"), Some(text("#000000")));
        assert_eq!(
            config.value_at("page.layout.pagePadding"),
            Some(StyleValue::Number(16.0))
        );
        assert_eq!(config.value_at("page.mode"), Some(text("light")));
        assert_eq!(config.value_at("tokens.missing"), None);
        assert_eq!(config.value_at("nope"), None);
    }

    #[test]
    fn test_extra_keys_survive_serde_round_trip() {
        let mut config = ThemeConfig::default();
        config.apply_override("backgroundVideo", &text("intro.mp4"));

        let json = serde_json::to_string(&config).unwrap();
        let back: ThemeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_mode_overlay() {
        let overlay = TokenOverlay {
            text: Some("#eeeeee".to_string()),
            ..TokenOverlay::default()
        };
        let mut tokens = ConfigTokens::default();
        overlay.apply_to(&mut tokens);
        assert_eq!(tokens.text, "#eeeeee");
        assert_eq!(tokens.primary, "#3b82f6");
    }
}
