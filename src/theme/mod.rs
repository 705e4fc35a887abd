//! Themes: token bundles, configuration trees and the catalog.
//!
//! This module provides:
//!
//! - [`Theme`]: a named, versioned bundle of design tokens and defaults
//! - [`ThemeConfig`]: the typed configuration tree with override plumbing
//! - [`Background`]: solid-color and gradient background tokens
//! - [`ThemeCatalog`]: key→theme lookup with a never-absent fallback

mod background;
mod catalog;
mod config;

pub use background::{Background, Gradient, DEFAULT_GRADIENT_ANGLE};
pub use catalog::{fallback_theme, Theme, ThemeCatalog};
pub use config::{
    ColorMode, ConfigTokens, ModeVariant, ModeVariants, PageLayout, PageSettings, TextAlign,
    ThemeConfig, ThemeDefaults, ThemeMeta, TokenOverlay,
};
