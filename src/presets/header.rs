//! Header layout presets.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{assign, assign_opt, SpacingScale};
use crate::value::StyleValue;

/// Id of the preset substituted when a header preset lookup misses.
pub const DEFAULT_HEADER_PRESET: &str = "no-cover";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverHeight {
    Sm,
    Md,
    Lg,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverType {
    Solid,
    Gradient,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarSize {
    Sm,
    Md,
    Lg,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarShape {
    Circle,
    Rounded,
    Square,
    Oval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarPosition {
    /// Avatar sits inside the header content flow.
    Center,
    /// Avatar straddles the cover's bottom edge.
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentAlign {
    Center,
    Left,
}

/// A complete header layout bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub has_cover: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_height: Option<CoverHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_type: Option<CoverType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_value: Option<String>,
    pub avatar_size: AvatarSize,
    pub avatar_shape: AvatarShape,
    pub avatar_position: AvatarPosition,
    pub avatar_border: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_border_color: Option<String>,
    pub content_align: ContentAlign,
    pub show_bio: bool,
    pub bio_max_lines: u8,
    pub spacing: SpacingScale,
}

impl HeaderPreset {
    /// Returns a copy with the given field overrides applied on top.
    ///
    /// Keys are the wire names (`coverHeight`, `avatarSize`, …); overrides
    /// always win field-by-field.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, StyleValue>) -> HeaderPreset {
        let mut merged = self.clone();
        for (key, value) in overrides {
            merged.apply(key, value);
        }
        merged
    }

    fn apply(&mut self, key: &str, value: &StyleValue) {
        match key {
            "hasCover" => assign(&mut self.has_cover, key, value),
            "coverHeight" => assign_opt(&mut self.cover_height, key, value),
            "coverType" => assign_opt(&mut self.cover_type, key, value),
            "coverValue" => assign_opt(&mut self.cover_value, key, value),
            "avatarSize" => assign(&mut self.avatar_size, key, value),
            "avatarShape" => assign(&mut self.avatar_shape, key, value),
            "avatarPosition" => assign(&mut self.avatar_position, key, value),
            "avatarBorder" => assign(&mut self.avatar_border, key, value),
            "avatarBorderColor" => assign_opt(&mut self.avatar_border_color, key, value),
            "contentAlign" => assign(&mut self.content_align, key, value),
            "showBio" => assign(&mut self.show_bio, key, value),
            "bioMaxLines" => assign(&mut self.bio_max_lines, key, value),
            "spacing" => assign(&mut self.spacing, key, value),
            _ => warn!(key, "unknown header field"),
        }
    }
}

static HEADER_PRESETS: Lazy<HashMap<&'static str, HeaderPreset>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert(
        "with-cover",
        HeaderPreset {
            id: "with-cover".to_string(),
            name: "With Cover".to_string(),
            description: "Header with cover image and overlapping avatar".to_string(),
            has_cover: true,
            cover_height: Some(CoverHeight::Md),
            cover_type: None,
            cover_value: None,
            avatar_size: AvatarSize::Lg,
            avatar_shape: AvatarShape::Circle,
            avatar_position: AvatarPosition::Overlap,
            avatar_border: true,
            avatar_border_color: Some("#ffffff".to_string()),
            content_align: ContentAlign::Center,
            show_bio: true,
            bio_max_lines: 3,
            spacing: SpacingScale::Comfortable,
        },
    );
    presets.insert(
        "no-cover",
        HeaderPreset {
            id: "no-cover".to_string(),
            name: "No Cover".to_string(),
            description: "Simple header without cover image".to_string(),
            has_cover: false,
            cover_height: None,
            cover_type: None,
            cover_value: None,
            avatar_size: AvatarSize::Lg,
            avatar_shape: AvatarShape::Circle,
            avatar_position: AvatarPosition::Center,
            avatar_border: false,
            avatar_border_color: None,
            content_align: ContentAlign::Center,
            show_bio: true,
            bio_max_lines: 3,
            spacing: SpacingScale::Comfortable,
        },
    );
    presets
});

/// Looks a header preset up by id, substituting the default on a miss.
pub fn header_preset(id: &str) -> &'static HeaderPreset {
    if let Some(preset) = HEADER_PRESETS.get(id) {
        return preset;
    }
    warn!(id, "unknown header preset id, using {DEFAULT_HEADER_PRESET}");
    HEADER_PRESETS
        .get(DEFAULT_HEADER_PRESET)
        .expect("header preset library contains its default entry")
}

/// All header presets, for preset pickers.
pub fn header_presets() -> Vec<&'static HeaderPreset> {
    let mut presets: Vec<_> = HEADER_PRESETS.values().collect();
    presets.sort_by_key(|p| p.id.as_str());
    presets
}
