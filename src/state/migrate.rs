//! Persistence format migration.
//!
//! Two historical blob shapes exist in stored pages. The flat shape is
//! canonical and the only one ever written:
//!
//! ```json
//! {"themeKey": "dark", "overrides": {"block.size": "lg"},
//!  "headerPresetId": "with-cover", "blockPresetId": "rounded-solid"}
//! ```
//!
//! The legacy shape nested per-region overrides and could carry a whole
//! `customTheme` document:
//!
//! ```json
//! {"themeKey": "dark", "customTheme": {...},
//!  "headerStyle": {"presetId": "with-cover", "overrides": {...}},
//!  "blockStyle": {"presetId": "rounded-solid", "overrides": {...}}}
//! ```
//!
//! Both are accepted on read — the flat shape is detected by its
//! top-level `overrides` key — and the upgrade is deliberately lossy:
//! legacy `customTheme` fields equal to the target theme's config were
//! redundant and are dropped. The rest of the engine only ever sees the
//! canonical [`AppearanceState`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppearanceError;
use crate::presets::{DEFAULT_BLOCK_PRESET, DEFAULT_HEADER_PRESET};
use crate::state::AppearanceState;
use crate::theme::ThemeCatalog;
use crate::value::{deep_eq, StyleValue};

/// The canonical (flat) persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAppearance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_key: Option<String>,
    pub overrides: BTreeMap<String, StyleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_preset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_preset_id: Option<String>,
}

impl PersistedAppearance {
    /// Strict decode of a flat-format blob.
    pub fn from_json(blob: &str) -> Result<Self, AppearanceError> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn to_json(&self) -> Result<String, AppearanceError> {
        serde_json::to_string(self).map_err(AppearanceError::Encode)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyAppearance {
    theme_key: Option<String>,
    custom_theme: Option<BTreeMap<String, StyleValue>>,
    header_style: Option<LegacyRegionStyle>,
    block_style: Option<LegacyRegionStyle>,
    /// Carried by some legacy writers; accepted and dropped.
    #[allow(dead_code)]
    appearance_version: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyRegionStyle {
    preset_id: Option<String>,
    overrides: Option<BTreeMap<String, StyleValue>>,
}

/// Either persisted shape. Order matters: the flat shape requires its
/// `overrides` key, so legacy blobs fall through to the second variant.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredAppearance {
    Flat(PersistedAppearance),
    Legacy(LegacyAppearance),
}

/// Decodes a persisted blob into appearance state, leniently.
///
/// Malformed JSON resets to the fallback theme's defaults; a broken blob
/// must never prevent the page from rendering.
pub fn decode_state(blob: &str, catalog: &ThemeCatalog) -> AppearanceState {
    match serde_json::from_str::<StoredAppearance>(blob) {
        Ok(StoredAppearance::Flat(flat)) => from_flat(flat, catalog),
        Ok(StoredAppearance::Legacy(legacy)) => from_legacy(legacy, catalog),
        Err(error) => {
            warn!(%error, "malformed appearance blob, resetting to defaults");
            AppearanceState::defaults_for(catalog.fallback())
        }
    }
}

/// Encodes state into the canonical flat blob.
///
/// Both preset ids are always written, so re-hydration never depends on
/// the theme catalog having loaded first.
pub fn encode_state(state: &AppearanceState) -> Result<String, AppearanceError> {
    PersistedAppearance {
        theme_key: Some(state.theme_key.clone()),
        overrides: state.overrides.clone(),
        header_preset_id: Some(
            state
                .header_preset_id
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADER_PRESET.to_string()),
        ),
        block_preset_id: Some(
            state
                .block_preset_id
                .clone()
                .unwrap_or_else(|| DEFAULT_BLOCK_PRESET.to_string()),
        ),
    }
    .to_json()
}

fn from_flat(flat: PersistedAppearance, catalog: &ThemeCatalog) -> AppearanceState {
    let theme_key = flat
        .theme_key
        .unwrap_or_else(|| catalog.fallback().key.clone());
    let theme = catalog.lookup(&theme_key);
    AppearanceState {
        header_preset_id: Some(
            flat.header_preset_id
                .unwrap_or_else(|| theme.header_preset_id().to_string()),
        ),
        block_preset_id: Some(
            flat.block_preset_id
                .unwrap_or_else(|| theme.block_preset_id().to_string()),
        ),
        theme_key,
        overrides: flat.overrides,
    }
}

fn from_legacy(legacy: LegacyAppearance, catalog: &ThemeCatalog) -> AppearanceState {
    let theme_key = legacy
        .theme_key
        .unwrap_or_else(|| catalog.fallback().key.clone());
    let theme = catalog.lookup(&theme_key);

    let mut overrides = BTreeMap::new();
    if let Some(custom) = &legacy.custom_theme {
        for (key, value) in custom {
            // `backgrounds` is an asset list, not a style value;
            // `backgroundVideo` is re-added below unconditionally.
            if key == "backgrounds" || key == "backgroundVideo" {
                continue;
            }
            let base = theme.config.value_at(key);
            if base.as_ref().is_some_and(|base| deep_eq(value, base)) {
                continue;
            }
            overrides.insert(key.clone(), value.clone());
        }
        if let Some(video) = custom.get("backgroundVideo") {
            overrides.insert("backgroundVideo".to_string(), video.clone());
        }
    }
    if let Some(region) = legacy.header_style.as_ref().and_then(|h| h.overrides.as_ref()) {
        for (key, value) in region {
            overrides.insert(format!("header.{key}"), value.clone());
        }
    }
    if let Some(region) = legacy.block_style.as_ref().and_then(|b| b.overrides.as_ref()) {
        for (key, value) in region {
            overrides.insert(format!("block.{key}"), value.clone());
        }
    }

    let header_preset_id = legacy
        .header_style
        .as_ref()
        .and_then(|h| h.preset_id.clone())
        .unwrap_or_else(|| theme.header_preset_id().to_string());
    let block_preset_id = legacy
        .block_style
        .as_ref()
        .and_then(|b| b.preset_id.clone())
        .unwrap_or_else(|| theme.block_preset_id().to_string());

    AppearanceState {
        theme_key,
        overrides,
        header_preset_id: Some(header_preset_id),
        block_preset_id: Some(block_preset_id),
    }
}
