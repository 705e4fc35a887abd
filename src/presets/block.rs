//! Link-block layout presets.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{assign, SpacingScale};
use crate::value::StyleValue;

/// Id of the preset substituted when a block preset lookup misses.
pub const DEFAULT_BLOCK_PRESET: &str = "rounded-solid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockShape {
    Rounded,
    Pill,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFill {
    Solid,
    Outline,
    Ghost,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSize {
    Sm,
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEffect {
    Lift,
    Scale,
    Glow,
    None,
}

/// A complete link-block layout bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPreset {
    pub id: String,
    pub name: String,
    pub shape: BlockShape,
    pub fill: BlockFill,
    pub size: BlockSize,
    pub icon_position: IconPosition,
    pub spacing: SpacingScale,
    pub hover_effect: HoverEffect,
}

impl BlockPreset {
    /// Returns a copy with the given field overrides applied on top.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, StyleValue>) -> BlockPreset {
        let mut merged = self.clone();
        for (key, value) in overrides {
            merged.apply(key, value);
        }
        merged
    }

    fn apply(&mut self, key: &str, value: &StyleValue) {
        match key {
            "shape" => assign(&mut self.shape, key, value),
            "fill" => assign(&mut self.fill, key, value),
            "size" => assign(&mut self.size, key, value),
            "iconPosition" => assign(&mut self.icon_position, key, value),
            "spacing" => assign(&mut self.spacing, key, value),
            "hoverEffect" => assign(&mut self.hover_effect, key, value),
            // The style recipe selection travels in the same bucket but is
            // resolved separately, not merged into the layout bundle.
            "stylePreset" => {}
            _ => warn!(key, "unknown block field"),
        }
    }
}

static BLOCK_PRESETS: Lazy<HashMap<&'static str, BlockPreset>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert(
        "rounded-solid",
        BlockPreset {
            id: "rounded-solid".to_string(),
            name: "Rounded Solid".to_string(),
            shape: BlockShape::Rounded,
            fill: BlockFill::Solid,
            size: BlockSize::Md,
            icon_position: IconPosition::Left,
            spacing: SpacingScale::Comfortable,
            hover_effect: HoverEffect::Lift,
        },
    );
    presets.insert(
        "pill-outline",
        BlockPreset {
            id: "pill-outline".to_string(),
            name: "Pill Outline".to_string(),
            shape: BlockShape::Pill,
            fill: BlockFill::Outline,
            size: BlockSize::Md,
            icon_position: IconPosition::Left,
            spacing: SpacingScale::Comfortable,
            hover_effect: HoverEffect::Scale,
        },
    );
    presets.insert(
        "square-gradient",
        BlockPreset {
            id: "square-gradient".to_string(),
            name: "Square Gradient".to_string(),
            shape: BlockShape::Square,
            fill: BlockFill::Gradient,
            size: BlockSize::Lg,
            icon_position: IconPosition::Right,
            spacing: SpacingScale::Spacious,
            hover_effect: HoverEffect::Glow,
        },
    );
    presets.insert(
        "ghost",
        BlockPreset {
            id: "ghost".to_string(),
            name: "Ghost".to_string(),
            shape: BlockShape::Rounded,
            fill: BlockFill::Ghost,
            size: BlockSize::Sm,
            icon_position: IconPosition::None,
            spacing: SpacingScale::Compact,
            hover_effect: HoverEffect::None,
        },
    );
    presets.insert(
        "bold",
        BlockPreset {
            id: "bold".to_string(),
            name: "Bold".to_string(),
            shape: BlockShape::Pill,
            fill: BlockFill::Solid,
            size: BlockSize::Lg,
            icon_position: IconPosition::Left,
            spacing: SpacingScale::Spacious,
            hover_effect: HoverEffect::Scale,
        },
    );
    presets
});

/// Looks a block preset up by id, substituting the default on a miss.
pub fn block_preset(id: &str) -> &'static BlockPreset {
    if let Some(preset) = BLOCK_PRESETS.get(id) {
        return preset;
    }
    warn!(id, "unknown block preset id, using {DEFAULT_BLOCK_PRESET}");
    BLOCK_PRESETS
        .get(DEFAULT_BLOCK_PRESET)
        .expect("block preset library contains its default entry")
}

/// All block presets, for preset pickers.
pub fn block_presets() -> Vec<&'static BlockPreset> {
    let mut presets: Vec<_> = BLOCK_PRESETS.values().collect();
    presets.sort_by_key(|p| p.id.as_str());
    presets
}
