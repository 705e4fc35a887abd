//! Theme records and the catalog that resolves keys to them.
//!
//! The catalog is a plain injected value, not an ambient singleton: build
//! one from whatever source supplies themes and pass it to the state and
//! resolution APIs. Lookup never fails — a key the catalog does not know
//! resolves to the fallback theme, which is always fully specified.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::theme::{
    Background, ColorMode, ConfigTokens, PageLayout, PageSettings, TextAlign, ThemeConfig,
    ThemeDefaults, ThemeMeta,
};

/// A named, versioned bundle of design tokens and layout defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub id: i64,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub config: ThemeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_header_preset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_block_preset_id: Option<String>,
}

impl Theme {
    /// The header preset this theme selects by default.
    pub fn header_preset_id(&self) -> &str {
        self.default_header_preset_id
            .as_deref()
            .unwrap_or(&self.config.defaults.header_preset)
    }

    /// The block preset this theme selects by default.
    pub fn block_preset_id(&self) -> &str {
        self.default_block_preset_id
            .as_deref()
            .unwrap_or(&self.config.defaults.block_preset)
    }
}

/// Immutable mapping from theme key to [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: HashMap<String, Theme>,
    fallback: Theme,
}

impl ThemeCatalog {
    /// Builds a catalog with the built-in `minimal` fallback.
    pub fn new(themes: impl IntoIterator<Item = Theme>) -> Self {
        Self::with_fallback(themes, fallback_theme())
    }

    /// Builds a catalog with a caller-supplied fallback theme.
    ///
    /// The fallback is also inserted under its own key, so it can always
    /// be selected explicitly.
    pub fn with_fallback(themes: impl IntoIterator<Item = Theme>, fallback: Theme) -> Self {
        let mut map: HashMap<String, Theme> = HashMap::new();
        map.insert(fallback.key.clone(), fallback.clone());
        for theme in themes {
            map.insert(theme.key.clone(), theme);
        }
        Self {
            themes: map,
            fallback,
        }
    }

    /// The stock catalog: `minimal`, `dark` and `gradient`.
    pub fn builtin() -> Self {
        Self::new([dark_theme(), gradient_theme()])
    }

    /// Looks a theme up, `None` when the key is unknown.
    pub fn get(&self, key: &str) -> Option<&Theme> {
        self.themes.get(key)
    }

    /// Looks a theme up, substituting the fallback on a miss.
    pub fn lookup(&self, key: &str) -> &Theme {
        match self.themes.get(key) {
            Some(theme) => theme,
            None => {
                warn!(key, fallback = %self.fallback.key, "unknown theme key, using fallback");
                &self.fallback
            }
        }
    }

    /// The designated fallback theme.
    pub fn fallback(&self) -> &Theme {
        &self.fallback
    }

    /// Number of themes, fallback included.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Iterates over all theme keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|k| k.as_str())
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::new([])
    }
}

/// The built-in `minimal` theme used whenever a lookup misses.
pub fn fallback_theme() -> Theme {
    Theme {
        id: 1,
        key: "minimal".to_string(),
        name: "Minimal".to_string(),
        config: ThemeConfig {
            meta: meta("minimal", "Minimal"),
            tokens: ConfigTokens {
                bg: Background::solid("#ffffff"),
                text: "#000000".to_string(),
                primary: "#3b82f6".to_string(),
                surface: "#f8fafc".to_string(),
                border: "#e2e8f0".to_string(),
                block_base: "#3b82f6".to_string(),
                font_family: "Inter".to_string(),
            },
            defaults: ThemeDefaults {
                header_preset: "no-cover".to_string(),
                block_preset: "rounded-solid".to_string(),
                block_style_preset: "solid".to_string(),
            },
            page: PageSettings {
                mode: ColorMode::Light,
                layout: PageLayout {
                    max_width: 680,
                    page_padding: 16,
                    block_gap: 12,
                    text_align: TextAlign::Center,
                },
            },
            modes: None,
            extra: Default::default(),
        },
        default_header_preset_id: Some("no-cover".to_string()),
        default_block_preset_id: Some("rounded-solid".to_string()),
    }
}

fn dark_theme() -> Theme {
    Theme {
        id: 2,
        key: "dark".to_string(),
        name: "Dark".to_string(),
        config: ThemeConfig {
            meta: meta("dark", "Dark"),
            tokens: ConfigTokens {
                bg: Background::solid("#1a1a1a"),
                text: "#ffffff".to_string(),
                primary: "#60a5fa".to_string(),
                surface: "#262626".to_string(),
                border: "#404040".to_string(),
                block_base: "#60a5fa".to_string(),
                font_family: "Inter".to_string(),
            },
            defaults: ThemeDefaults {
                header_preset: "with-cover".to_string(),
                block_preset: "rounded-solid".to_string(),
                block_style_preset: "solid".to_string(),
            },
            page: PageSettings {
                mode: ColorMode::Dark,
                layout: PageLayout {
                    max_width: 680,
                    page_padding: 20,
                    block_gap: 14,
                    text_align: TextAlign::Center,
                },
            },
            modes: None,
            extra: Default::default(),
        },
        default_header_preset_id: Some("with-cover".to_string()),
        default_block_preset_id: Some("rounded-solid".to_string()),
    }
}

fn gradient_theme() -> Theme {
    Theme {
        id: 3,
        key: "gradient".to_string(),
        name: "Gradient".to_string(),
        config: ThemeConfig {
            meta: meta("gradient", "Gradient"),
            tokens: ConfigTokens {
                bg: Background::gradient("#667eea", "#764ba2", 135.0),
                text: "#ffffff".to_string(),
                primary: "#ffffff".to_string(),
                surface: "#ffffff".to_string(),
                border: "#ffffff".to_string(),
                block_base: "#ffffff".to_string(),
                font_family: "Poppins".to_string(),
            },
            defaults: ThemeDefaults {
                header_preset: "with-cover".to_string(),
                block_preset: "pill-outline".to_string(),
                block_style_preset: "outline".to_string(),
            },
            page: PageSettings {
                mode: ColorMode::Dark,
                layout: PageLayout {
                    max_width: 680,
                    page_padding: 24,
                    block_gap: 16,
                    text_align: TextAlign::Center,
                },
            },
            modes: None,
            extra: Default::default(),
        },
        default_header_preset_id: Some("with-cover".to_string()),
        default_block_preset_id: Some("pill-outline".to_string()),
    }
}

fn meta(id: &str, name: &str) -> ThemeMeta {
    ThemeMeta {
        id: id.to_string(),
        name: name.to_string(),
        schema_version: 2,
        version: "2.0.0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{block_presets, header_presets};

    #[test]
    fn test_lookup_known_key() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.lookup("dark").key, "dark");
        assert_eq!(catalog.get("gradient").map(|t| t.id), Some(3));
    }

    #[test]
    fn test_lookup_miss_falls_back() {
        let catalog = ThemeCatalog::builtin();
        let theme = catalog.lookup("does-not-exist");
        assert_eq!(theme.key, "minimal");
        assert!(catalog.get("does-not-exist").is_none());
    }

    #[test]
    fn test_fallback_always_selectable() {
        let catalog = ThemeCatalog::new([]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("minimal").is_some());
    }

    #[test]
    fn test_custom_fallback() {
        let mut custom = fallback_theme();
        custom.key = "brand".to_string();
        let catalog = ThemeCatalog::with_fallback([], custom);
        assert_eq!(catalog.lookup("whatever").key, "brand");
    }

    #[test]
    fn test_preset_id_chain() {
        let mut theme = fallback_theme();
        assert_eq!(theme.header_preset_id(), "no-cover");

        theme.default_header_preset_id = None;
        theme.config.defaults.header_preset = "with-cover".to_string();
        assert_eq!(theme.header_preset_id(), "with-cover");
    }

    #[test]
    fn test_builtin_defaults_exist_in_preset_libraries() {
        let catalog = ThemeCatalog::builtin();
        for key in catalog.keys() {
            let theme = catalog.lookup(key);
            assert!(
                header_presets().iter().any(|p| p.id == theme.header_preset_id()),
                "missing header preset for {key}"
            );
            assert!(
                block_presets().iter().any(|p| p.id == theme.block_preset_id()),
                "missing block preset for {key}"
            );
        }
    }

    #[test]
    fn test_theme_serde_round_trip() {
        let theme = fallback_theme();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }
}
