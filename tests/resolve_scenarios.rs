//! End-to-end scenarios: blob in, resolved appearance out, blob back.

use veneer::presets::{block_preset, header_preset, BlockSize};
use veneer::{decode_state, encode_state, AppearanceState, ThemeCatalog};

#[test]
fn minimal_theme_with_block_size_override() {
    let catalog = ThemeCatalog::builtin();
    let state = decode_state(
        r#"{"themeKey": "minimal", "overrides": {"block.size": "lg"},
            "headerPresetId": "no-cover", "blockPresetId": "rounded-solid"}"#,
        &catalog,
    );
    let resolved = catalog.resolve(&state);

    // The override lands on the one field it addresses.
    assert_eq!(resolved.block.size, BlockSize::Lg);

    // Every other block field matches the rounded-solid preset.
    let mut expected = block_preset("rounded-solid").clone();
    expected.size = BlockSize::Lg;
    assert_eq!(resolved.block, expected);

    // The header is the no-cover preset, unmodified.
    assert_eq!(resolved.header, *header_preset("no-cover"));

    // Theme tokens came through.
    assert_eq!(resolved.tokens.background_color, "#ffffff");
    assert_eq!(resolved.tokens.block_base, "#3b82f6");
}

#[test]
fn unknown_theme_key_resolves_from_fallback() {
    let catalog = ThemeCatalog::builtin();
    let state = decode_state(r#"{"themeKey": "retrowave", "overrides": {}}"#, &catalog);
    let resolved = catalog.resolve(&state);

    assert_eq!(resolved.theme.key, "minimal");
    assert_eq!(resolved.tokens.text, "#000000");
}

#[test]
fn change_theme_discards_all_customization() {
    let catalog = ThemeCatalog::builtin();
    let state = AppearanceState::defaults_for(catalog.lookup("minimal"))
        .set_value(&catalog, "block.size", Some("lg".into()))
        .set_value(&catalog, "backgroundColor", Some("#123456".into()))
        .change_header_preset("with-cover");
    assert!(state.is_customized(&catalog));

    let reset = state.change_theme(&catalog, "dark");
    assert!(reset.overrides.is_empty());
    assert!(!reset.is_customized(&catalog));
    assert_eq!(reset.header_preset_id.as_deref(), Some("with-cover"));
}

#[test]
fn edit_save_reload_cycle() {
    let catalog = ThemeCatalog::builtin();

    let state = AppearanceState::defaults_for(catalog.lookup("dark"))
        .set_value(&catalog, "block.stylePreset", Some("neon".into()))
        .set_value(&catalog, "header.avatarShape", Some("square".into()));

    let blob = encode_state(&state).unwrap();
    let reloaded = decode_state(&blob, &catalog);
    assert_eq!(reloaded, state);

    let resolved = catalog.resolve(&reloaded);
    assert_eq!(resolved.block_style.preset, "neon");
    // dark theme blockBase is #60a5fa; the neon glow carries its alpha.
    assert_eq!(resolved.block_style.glow.as_deref(), Some("rgba(96, 165, 250, 0.55)"));
}

#[test]
fn legacy_blob_upgrade_then_save_writes_flat_format() {
    let catalog = ThemeCatalog::builtin();
    let state = decode_state(
        r#"{"themeKey": "minimal",
            "customTheme": {"backgroundVideo": "loop.mp4"},
            "blockStyle": {"presetId": "bold", "overrides": {"size": "sm"}}}"#,
        &catalog,
    );
    assert_eq!(state.block_preset_id.as_deref(), Some("bold"));
    assert_eq!(state.overrides.get("block.size"), Some(&"sm".into()));
    assert_eq!(state.overrides.get("backgroundVideo"), Some(&"loop.mp4".into()));

    let blob = encode_state(&state).unwrap();
    assert!(blob.contains(r#""overrides""#));
    assert!(!blob.contains("blockStyle"));
    assert_eq!(decode_state(&blob, &catalog), state);
}

#[test]
fn gradient_theme_round_trips_background_edits() {
    let catalog = ThemeCatalog::builtin();
    let state = AppearanceState::defaults_for(catalog.lookup("gradient"));

    // An equivalent gradient string snaps back to the preset.
    let same = state.set_value(
        &catalog,
        "backgroundColor",
        Some("linear-gradient(135deg,#667eea,#764ba2)".into()),
    );
    assert!(same.overrides.is_empty());

    // A different angle is a real customization and resolves.
    let rotated = state.set_value(
        &catalog,
        "backgroundColor",
        Some("linear-gradient(45deg, #667eea, #764ba2)".into()),
    );
    assert!(rotated.overrides.contains_key("backgroundColor"));
    let resolved = catalog.resolve(&rotated);
    assert_eq!(
        resolved.tokens.background_color,
        "linear-gradient(45deg, #667eea, #764ba2)"
    );
}
