//! Veneer: theme and appearance resolution for personal link pages.
//!
//! A page's appearance is the combination of a named theme (a versioned
//! bundle of design tokens and default presets), two sub-preset
//! selections (header layout and link-block layout), and a sparse set of
//! user overrides keyed by dotted path. This crate is the pure,
//! deterministic engine that turns those pieces into one render-ready
//! style object — and back into the persisted form.
//!
//! # Overview
//!
//! - [`theme`]: theme records, the typed config tree, backgrounds and the
//!   key→theme catalog with its never-absent fallback
//! - [`presets`]: the immutable header, block and block-style libraries
//! - [`tokens`]: token references (`blockBase@0.14`) and the expanded
//!   token set with derived colors
//! - [`resolve`]: the resolution algorithm producing [`ResolvedAppearance`]
//! - [`state`]: the editable [`AppearanceState`], its pure mutation
//!   operations, and migration between the two persisted formats
//!
//! The crate performs no I/O and renders no pixels. Catalogs are plain
//! injected values; persistence hands blobs in and out as strings; the
//! renderer consumes the resolved tree. Every input, however malformed,
//! resolves to *some* valid appearance — misses and parse failures degrade
//! to defaults and are logged through `tracing`, never raised.
//!
//! # Quick start
//!
//! ```rust
//! use veneer::{decode_state, encode_state, ThemeCatalog};
//!
//! let catalog = ThemeCatalog::builtin();
//!
//! // Hydrate from a stored blob (either historical format).
//! let state = decode_state(
//!     r#"{"themeKey": "minimal", "overrides": {"block.size": "lg"}}"#,
//!     &catalog,
//! );
//!
//! // Resolve for rendering.
//! let resolved = catalog.resolve(&state);
//! assert_eq!(resolved.tokens.background_color, "#ffffff");
//!
//! // Edit, then serialize back for storage.
//! let state = state.set_value(&catalog, "header.showBio", Some(false.into()));
//! let blob = encode_state(&state).unwrap();
//! assert!(blob.contains("headerPresetId"));
//! ```

pub mod color;
pub mod error;
pub mod presets;
pub mod resolve;
pub mod state;
pub mod theme;
pub mod tokens;
pub mod value;

pub use error::AppearanceError;
pub use presets::{
    block_preset, block_presets, block_style_recipe, header_preset, header_presets, BlockPreset,
    BlockStyleRecipe, HeaderPreset,
};
pub use resolve::{resolve_appearance, BlockStyleColors, ResolvedAppearance};
pub use state::{decode_state, encode_state, AppearanceState, PersistedAppearance};
pub use theme::{fallback_theme, Background, Gradient, Theme, ThemeCatalog, ThemeConfig};
pub use tokens::{TokenRef, TokenSet};
pub use value::{deep_eq, StyleValue};
