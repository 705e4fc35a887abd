//! The appearance resolution algorithm.
//!
//! Resolution combines a theme, the preset libraries and a user's sparse
//! overrides into one render-ready [`ResolvedAppearance`]:
//!
//! 1. Overrides are partitioned by path prefix (`header.`, `block.`,
//!    theme-level) and the theme-level bucket is merged into a copy of the
//!    theme config.
//! 2. The merged config expands into the full [`TokenSet`].
//! 3. Header and block presets are looked up and overlaid field-by-field.
//! 4. The selected block style recipe resolves to concrete colors.
//!
//! Steps 2–4 read only the merged config and the original state, never
//! each other's output, so their order is free.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::presets::{
    block_preset, block_style_recipe, header_preset, BlockPreset, HeaderPreset,
    DEFAULT_BLOCK_PRESET, DEFAULT_HEADER_PRESET,
};
use crate::state::AppearanceState;
use crate::theme::{Theme, ThemeCatalog, ThemeConfig};
use crate::tokens::{resolve as resolve_token, resolve_auto_text, TokenSet};
use crate::value::StyleValue;

/// The fully-resolved appearance handed to the renderer. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAppearance {
    /// The source theme record.
    pub theme: Theme,
    /// Expanded token set, derived colors included.
    pub tokens: TokenSet,
    /// Header preset with `header.*` overrides applied.
    pub header: HeaderPreset,
    /// Block preset with `block.*` overrides applied.
    pub block: BlockPreset,
    /// Resolved block style colors.
    pub block_style: BlockStyleColors,
}

/// A block style recipe resolved against a theme's tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyleColors {
    /// The recipe id this was resolved from.
    pub preset: String,
    pub fill: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

/// Overrides split into their three path namespaces. Prefixes are already
/// stripped from the header and block buckets.
#[derive(Debug, Clone, Default)]
pub(crate) struct OverrideBuckets {
    pub theme: BTreeMap<String, StyleValue>,
    pub header: BTreeMap<String, StyleValue>,
    pub block: BTreeMap<String, StyleValue>,
}

pub(crate) fn partition_overrides(overrides: &BTreeMap<String, StyleValue>) -> OverrideBuckets {
    let mut buckets = OverrideBuckets::default();
    for (path, value) in overrides {
        if let Some(rest) = path.strip_prefix("header.") {
            buckets.header.insert(rest.to_string(), value.clone());
        } else if let Some(rest) = path.strip_prefix("block.") {
            buckets.block.insert(rest.to_string(), value.clone());
        } else {
            buckets.theme.insert(path.clone(), value.clone());
        }
    }
    buckets
}

/// Resolves an appearance state against a theme.
///
/// With no theme, resolution starts from the built-in default config under
/// a synthetic `custom` theme record. Every input, however malformed,
/// produces a usable result.
pub fn resolve_appearance(theme: Option<&Theme>, state: &AppearanceState) -> ResolvedAppearance {
    let buckets = partition_overrides(&state.overrides);

    // Merged theme config: base config plus the theme-level bucket.
    let mut config = theme.map(|t| t.config.clone()).unwrap_or_default();
    for (path, value) in &buckets.theme {
        config.apply_override(path, value);
    }

    let tokens = TokenSet::expand(&config);

    let header_id = state
        .header_preset_id
        .as_deref()
        .or(theme.map(Theme::header_preset_id))
        .unwrap_or(DEFAULT_HEADER_PRESET);
    let header = header_preset(header_id).with_overrides(&buckets.header);

    let block_id = state
        .block_preset_id
        .as_deref()
        .or(theme.map(Theme::block_preset_id))
        .unwrap_or(DEFAULT_BLOCK_PRESET);
    let block = block_preset(block_id).with_overrides(&buckets.block);

    let style_id = buckets
        .block
        .get("stylePreset")
        .and_then(StyleValue::as_str)
        .unwrap_or(config.defaults.block_style_preset.as_str());
    let block_style = resolve_block_style(style_id, &tokens);

    let theme = theme.cloned().unwrap_or_else(custom_theme_record);

    ResolvedAppearance {
        theme,
        tokens,
        header,
        block,
        block_style,
    }
}

/// Resolves a block style recipe against an expanded token set.
pub fn resolve_block_style(style_id: &str, tokens: &TokenSet) -> BlockStyleColors {
    let recipe = block_style_recipe(style_id);
    let fill = resolve_token(recipe.fill, tokens);
    let text = if recipe.text == "auto" {
        resolve_auto_text(recipe.fill, tokens)
    } else {
        resolve_token(recipe.text, tokens)
    };
    let border = recipe.border.map(|raw| {
        // Literal CSS borders (the brutal recipe) pass through.
        if raw.contains("px") {
            raw.to_string()
        } else {
            resolve_token(raw, tokens)
        }
    });
    let glow = recipe.glow.map(|raw| resolve_token(raw, tokens));
    let shadow = recipe.shadow.map(|raw| {
        if raw.contains("px") {
            raw.to_string()
        } else {
            format!("4px 4px 0px {}", resolve_token(raw, tokens))
        }
    });

    BlockStyleColors {
        preset: recipe.id.to_string(),
        fill,
        text,
        border,
        glow,
        blur: recipe.blur,
        shadow,
    }
}

fn custom_theme_record() -> Theme {
    Theme {
        id: 0,
        key: "custom".to_string(),
        name: "Custom".to_string(),
        config: ThemeConfig::default(),
        default_header_preset_id: None,
        default_block_preset_id: None,
    }
}

impl ThemeCatalog {
    /// Looks the state's theme up (falling back on a miss) and resolves.
    pub fn resolve(&self, state: &AppearanceState) -> ResolvedAppearance {
        resolve_appearance(Some(self.lookup(&state.theme_key)), state)
    }
}
