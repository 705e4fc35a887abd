//! Preset libraries: header layouts, link-block layouts and block style
//! recipes.
//!
//! Each library is a small, immutable set of named bundles loaded once per
//! process. Lookup by id never fails — an unknown id resolves to the
//! library's default entry so a stale persisted id can never break
//! rendering.

mod block;
mod header;
mod recipes;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use block::{
    block_preset, block_presets, BlockFill, BlockPreset, BlockShape, BlockSize, HoverEffect,
    IconPosition, DEFAULT_BLOCK_PRESET,
};
pub use header::{
    header_preset, header_presets, AvatarPosition, AvatarShape, AvatarSize, ContentAlign,
    CoverHeight, CoverType, HeaderPreset, DEFAULT_HEADER_PRESET,
};
pub use recipes::{
    block_style_recipe, block_style_recipes, recipe_ids, BlockStyleRecipe, DEFAULT_BLOCK_STYLE,
};

use crate::value::{coerce, to_style_value, StyleValue};

/// Vertical rhythm shared by header and block presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpacingScale {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

/// Reads one preset field as a [`StyleValue`], keyed by its wire name.
pub(crate) fn preset_field<T: Serialize>(preset: &T, key: &str) -> Option<StyleValue> {
    match to_style_value(preset)? {
        StyleValue::Map(mut fields) => fields.remove(key),
        _ => None,
    }
}

/// Writes an override into a required preset field, keeping the preset
/// value when the override has the wrong shape.
pub(crate) fn assign<T: DeserializeOwned>(slot: &mut T, key: &str, value: &StyleValue) {
    match coerce::<T>(value) {
        Some(parsed) => *slot = parsed,
        None => warn!(key, "override value has the wrong shape, keeping preset value"),
    }
}

/// Writes an override into an optional preset field. A null clears it.
pub(crate) fn assign_opt<T: DeserializeOwned>(slot: &mut Option<T>, key: &str, value: &StyleValue) {
    if matches!(value, StyleValue::Null) {
        *slot = None;
        return;
    }
    match coerce::<T>(value) {
        Some(parsed) => *slot = Some(parsed),
        None => warn!(key, "override value has the wrong shape, keeping preset value"),
    }
}
