//! Block style recipes.
//!
//! A recipe is an abstract formula: fill, text, border and glow are token
//! references (`blockBase`, `blockBase@0.14`, `transparent`, or the literal
//! `auto` for contrast-picked text) that get resolved against a theme's
//! token set at render time. The library is shared across all themes.

use tracing::warn;

/// Id of the recipe substituted when a style lookup misses.
pub const DEFAULT_BLOCK_STYLE: &str = "solid";

/// An abstract block style formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyleRecipe {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Fill token reference.
    pub fill: &'static str,
    /// Text token reference, or `auto` for contrast-picked text.
    pub text: &'static str,
    /// Border token reference or literal CSS border.
    pub border: Option<&'static str>,
    /// Glow color token reference.
    pub glow: Option<&'static str>,
    /// Backdrop blur in pixels, for frosted-glass styles.
    pub blur: Option<u8>,
    /// Hard shadow: literal CSS, or a token reference for the shadow color.
    pub shadow: Option<&'static str>,
}

const RECIPES: &[BlockStyleRecipe] = &[
    BlockStyleRecipe {
        id: "solid",
        name: "Solid",
        description: "Full color with contrast text",
        fill: "blockBase",
        text: "auto",
        border: Some("none"),
        glow: None,
        blur: None,
        shadow: None,
    },
    BlockStyleRecipe {
        id: "soft",
        name: "Soft",
        description: "Subtle tint with border",
        fill: "blockBase@0.14",
        text: "text",
        border: Some("blockBase@0.28"),
        glow: None,
        blur: None,
        shadow: None,
    },
    BlockStyleRecipe {
        id: "outline",
        name: "Outline",
        description: "Transparent with border",
        fill: "transparent",
        text: "blockBase",
        border: Some("blockBase"),
        glow: None,
        blur: None,
        shadow: None,
    },
    BlockStyleRecipe {
        id: "glass",
        name: "Glass",
        description: "Frosted glass effect",
        fill: "surface@0.35",
        text: "text",
        border: Some("border@0.6"),
        glow: None,
        blur: Some(10),
        shadow: None,
    },
    BlockStyleRecipe {
        id: "neon",
        name: "Neon",
        description: "Solid with glow",
        fill: "blockBase",
        text: "auto",
        border: Some("none"),
        glow: Some("blockBase@0.55"),
        blur: None,
        shadow: None,
    },
    BlockStyleRecipe {
        id: "brutal",
        name: "Brutal",
        description: "Hard shadow brutalism",
        fill: "blockBase",
        text: "auto",
        border: Some("2px solid #000000"),
        glow: None,
        blur: None,
        shadow: Some("4px 4px 0px rgba(0,0,0,1)"),
    },
];

/// Looks a recipe up by id, substituting `solid` on a miss.
pub fn block_style_recipe(id: &str) -> &'static BlockStyleRecipe {
    if let Some(recipe) = RECIPES.iter().find(|r| r.id == id) {
        return recipe;
    }
    warn!(id, "unknown block style id, using {DEFAULT_BLOCK_STYLE}");
    &RECIPES[0]
}

/// All recipes, in display order.
pub fn block_style_recipes() -> &'static [BlockStyleRecipe] {
    RECIPES
}

/// All recipe ids, in display order.
pub fn recipe_ids() -> impl Iterator<Item = &'static str> {
    RECIPES.iter().map(|r| r.id)
}
