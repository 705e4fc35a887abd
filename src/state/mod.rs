//! Appearance state and its mutation operations.
//!
//! [`AppearanceState`] is the single value a user edits: a theme key, two
//! sub-preset selections, and a flat map of dotted-path overrides. Every
//! mutation is a pure function producing a new state, and every mutation
//! maintains the snap-to-preset invariant: an override equal to what the
//! theme/preset combination would produce anyway is removed rather than
//! stored.

mod migrate;

use std::collections::BTreeMap;

pub use migrate::{decode_state, encode_state, PersistedAppearance};

use crate::presets::{block_preset, header_preset, preset_field};
use crate::theme::{Theme, ThemeCatalog};
use crate::value::{deep_eq, StyleValue};

/// The canonical in-memory appearance state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceState {
    /// Selected theme, as a weak reference into the catalog.
    pub theme_key: String,
    /// Sparse overrides keyed by dotted path. Paths under `header.` and
    /// `block.` address the sub-presets; everything else addresses the
    /// theme config.
    pub overrides: BTreeMap<String, StyleValue>,
    pub header_preset_id: Option<String>,
    pub block_preset_id: Option<String>,
}

impl AppearanceState {
    /// Fresh state carrying a theme's declared defaults and no overrides.
    pub fn defaults_for(theme: &Theme) -> AppearanceState {
        AppearanceState {
            theme_key: theme.key.clone(),
            overrides: BTreeMap::new(),
            header_preset_id: Some(theme.header_preset_id().to_string()),
            block_preset_id: Some(theme.block_preset_id().to_string()),
        }
    }

    /// What the unedited theme/preset combination produces at `path`.
    ///
    /// `backgroundColor` reads as the theme background's CSS string, the
    /// historical flat form edits compare against.
    pub fn preset_value(&self, catalog: &ThemeCatalog, path: &str) -> Option<StyleValue> {
        let theme = catalog.lookup(&self.theme_key);
        if let Some(key) = path.strip_prefix("header.") {
            let id = self
                .header_preset_id
                .as_deref()
                .unwrap_or(theme.header_preset_id());
            preset_field(header_preset(id), key)
        } else if let Some(key) = path.strip_prefix("block.") {
            let id = self
                .block_preset_id
                .as_deref()
                .unwrap_or(theme.block_preset_id());
            preset_field(block_preset(id), key)
        } else if path == "backgroundColor" {
            Some(StyleValue::Text(theme.config.tokens.bg.css()))
        } else {
            theme.config.value_at(path)
        }
    }

    /// The effective value at `path`: the override if present, else the
    /// preset value.
    pub fn resolved_value(&self, catalog: &ThemeCatalog, path: &str) -> Option<StyleValue> {
        if let Some(value) = self.overrides.get(path) {
            return Some(value.clone());
        }
        self.preset_value(catalog, path)
    }

    /// Sets (or clears) the value at `path`, snapping back to the preset.
    ///
    /// A `None` or null value removes the override. A value equal (by
    /// gradient-normalizing deep equality) to the preset value also
    /// removes it, keeping `overrides` minimal.
    pub fn set_value(
        &self,
        catalog: &ThemeCatalog,
        path: &str,
        value: Option<StyleValue>,
    ) -> AppearanceState {
        let mut next = self.clone();
        let value = match value {
            None | Some(StyleValue::Null) => {
                next.overrides.remove(path);
                return next;
            }
            Some(value) => value,
        };
        match self.preset_value(catalog, path) {
            Some(preset) if deep_eq(&value, &preset) => {
                next.overrides.remove(path);
            }
            _ => {
                next.overrides.insert(path.to_string(), value);
            }
        }
        next
    }

    /// Switches themes. A hard reset by design: all overrides are
    /// discarded and both preset selections jump to the new theme's
    /// declared defaults.
    pub fn change_theme(&self, catalog: &ThemeCatalog, theme_key: &str) -> AppearanceState {
        let theme = catalog.lookup(theme_key);
        AppearanceState {
            theme_key: theme_key.to_string(),
            overrides: BTreeMap::new(),
            header_preset_id: Some(theme.header_preset_id().to_string()),
            block_preset_id: Some(theme.block_preset_id().to_string()),
        }
    }

    /// Selects a header preset, dropping every `header.*` override: the
    /// old preset's field values would otherwise leak into the new one.
    /// Block and theme-level overrides are untouched.
    pub fn change_header_preset(&self, id: &str) -> AppearanceState {
        let mut next = self.clone();
        next.header_preset_id = Some(id.to_string());
        next.overrides.retain(|path, _| !path.starts_with("header."));
        next
    }

    /// Selects a block preset, dropping every `block.*` override.
    pub fn change_block_preset(&self, id: &str) -> AppearanceState {
        let mut next = self.clone();
        next.block_preset_id = Some(id.to_string());
        next.overrides.retain(|path, _| !path.starts_with("block."));
        next
    }

    /// Whether this state differs from the active theme's out-of-the-box
    /// appearance. Purely a UI signal.
    pub fn is_customized(&self, catalog: &ThemeCatalog) -> bool {
        if !self.overrides.is_empty() {
            return true;
        }
        let theme = catalog.lookup(&self.theme_key);
        if self
            .header_preset_id
            .as_deref()
            .is_some_and(|id| id != theme.header_preset_id())
        {
            return true;
        }
        self.block_preset_id
            .as_deref()
            .is_some_and(|id| id != theme.block_preset_id())
    }

    /// Whether the header region is untouched: default preset, no
    /// `header.*` overrides.
    pub fn is_header_default(&self, catalog: &ThemeCatalog) -> bool {
        let theme = catalog.lookup(&self.theme_key);
        self.header_preset_id
            .as_deref()
            .map_or(true, |id| id == theme.header_preset_id())
            && !self.overrides.keys().any(|path| path.starts_with("header."))
    }

    /// Whether the block region is untouched.
    pub fn is_block_default(&self, catalog: &ThemeCatalog) -> bool {
        let theme = catalog.lookup(&self.theme_key);
        self.block_preset_id
            .as_deref()
            .map_or(true, |id| id == theme.block_preset_id())
            && !self.overrides.keys().any(|path| path.starts_with("block."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::builtin()
    }

    fn minimal_state(catalog: &ThemeCatalog) -> AppearanceState {
        AppearanceState::defaults_for(catalog.lookup("minimal"))
    }

    // =========================================================================
    // set_value and snap-to-preset
    // =========================================================================

    #[test]
    fn test_set_value_stores_divergent_value() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        let next = state.set_value(&catalog, "block.size", Some("lg".into()));
        assert_eq!(next.overrides.get("block.size"), Some(&"lg".into()));
    }

    #[test]
    fn test_set_value_snaps_back_to_preset() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        let next = state.set_value(&catalog, "block.size", Some("lg".into()));
        // rounded-solid's size is md, so setting md removes the override.
        let snapped = next.set_value(&catalog, "block.size", Some("md".into()));
        assert!(snapped.overrides.is_empty());
    }

    #[test]
    fn test_set_value_null_removes() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        let next = state.set_value(&catalog, "block.size", Some("lg".into()));
        assert!(next
            .set_value(&catalog, "block.size", None)
            .overrides
            .is_empty());
        assert!(next
            .set_value(&catalog, "block.size", Some(StyleValue::Null))
            .overrides
            .is_empty());
    }

    #[test]
    fn test_set_value_gradient_snap_ignores_formatting() {
        let catalog = catalog();
        let state = AppearanceState::defaults_for(catalog.lookup("gradient"));
        // The gradient theme's background renders as
        // linear-gradient(135deg, #667eea, #764ba2); an equivalent string
        // with stop percentages must still snap.
        let next = state.set_value(
            &catalog,
            "backgroundColor",
            Some("linear-gradient(135deg, #667eea 0%, #764ba2 100%)".into()),
        );
        assert!(next.overrides.is_empty());
    }

    #[test]
    fn test_set_value_unknown_path_is_stored() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        let next = state.set_value(&catalog, "backgroundVideo", Some("intro.mp4".into()));
        assert_eq!(next.overrides.get("backgroundVideo"), Some(&"intro.mp4".into()));
    }

    #[test]
    fn test_set_value_respects_selected_preset() {
        let catalog = catalog();
        // With the bold preset selected, size lg IS the preset value.
        let state = minimal_state(&catalog).change_block_preset("bold");
        let next = state.set_value(&catalog, "block.size", Some("lg".into()));
        assert!(next.overrides.is_empty());
    }

    // =========================================================================
    // Theme and preset changes
    // =========================================================================

    #[test]
    fn test_change_theme_is_hard_reset() {
        let catalog = catalog();
        let state = minimal_state(&catalog)
            .set_value(&catalog, "block.size", Some("lg".into()))
            .set_value(&catalog, "header.showBio", Some(false.into()))
            .set_value(&catalog, "backgroundColor", Some("#123456".into()));

        let next = state.change_theme(&catalog, "dark");
        assert_eq!(next.theme_key, "dark");
        assert!(next.overrides.is_empty());
        assert_eq!(next.header_preset_id.as_deref(), Some("with-cover"));
        assert_eq!(next.block_preset_id.as_deref(), Some("rounded-solid"));
    }

    #[test]
    fn test_change_theme_unknown_key_keeps_key_uses_fallback_defaults() {
        let catalog = catalog();
        let next = minimal_state(&catalog).change_theme(&catalog, "mystery");
        assert_eq!(next.theme_key, "mystery");
        assert_eq!(next.header_preset_id.as_deref(), Some("no-cover"));
    }

    #[test]
    fn test_change_header_preset_drops_only_header_overrides() {
        let catalog = catalog();
        let state = minimal_state(&catalog)
            .set_value(&catalog, "header.avatarSize", Some("sm".into()))
            .set_value(&catalog, "block.size", Some("lg".into()))
            .set_value(&catalog, "backgroundColor", Some("#123456".into()));

        let next = state.change_header_preset("with-cover");
        assert_eq!(next.header_preset_id.as_deref(), Some("with-cover"));
        assert!(!next.overrides.contains_key("header.avatarSize"));
        assert!(next.overrides.contains_key("block.size"));
        assert!(next.overrides.contains_key("backgroundColor"));
    }

    #[test]
    fn test_change_block_preset_drops_only_block_overrides() {
        let catalog = catalog();
        let state = minimal_state(&catalog)
            .set_value(&catalog, "header.avatarSize", Some("sm".into()))
            .set_value(&catalog, "block.size", Some("lg".into()));

        let next = state.change_block_preset("ghost");
        assert!(next.overrides.contains_key("header.avatarSize"));
        assert!(!next.overrides.contains_key("block.size"));
    }

    // =========================================================================
    // Reads and UI signals
    // =========================================================================

    #[test]
    fn test_resolved_value_prefers_override() {
        let catalog = catalog();
        let state = minimal_state(&catalog).set_value(&catalog, "block.size", Some("lg".into()));
        assert_eq!(
            state.resolved_value(&catalog, "block.size"),
            Some("lg".into())
        );
        assert_eq!(
            state.resolved_value(&catalog, "block.shape"),
            Some("rounded".into())
        );
    }

    #[test]
    fn test_preset_value_background_color_is_css() {
        let catalog = catalog();
        let state = AppearanceState::defaults_for(catalog.lookup("gradient"));
        assert_eq!(
            state.preset_value(&catalog, "backgroundColor"),
            Some("linear-gradient(135deg, #667eea, #764ba2)".into())
        );
    }

    #[test]
    fn test_is_customized() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        assert!(!state.is_customized(&catalog));

        assert!(state
            .set_value(&catalog, "block.size", Some("lg".into()))
            .is_customized(&catalog));
        assert!(state.change_header_preset("with-cover").is_customized(&catalog));
        assert!(state.change_block_preset("bold").is_customized(&catalog));
    }

    #[test]
    fn test_region_default_signals() {
        let catalog = catalog();
        let state = minimal_state(&catalog);
        assert!(state.is_header_default(&catalog));
        assert!(state.is_block_default(&catalog));

        let edited = state.set_value(&catalog, "header.showBio", Some(false.into()));
        assert!(!edited.is_header_default(&catalog));
        assert!(edited.is_block_default(&catalog));
    }
}
