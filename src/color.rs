//! Color helpers for hex parsing, channel adjustment and contrast.
//!
//! Everything in this module operates on plain CSS color strings. Values
//! that are not `#rrggbb` hex colors (gradients, keywords, pattern
//! declarations) pass through unchanged: channel arithmetic is only
//! meaningful on solid hex colors.

/// Fallback color used when a token reference cannot be resolved.
pub const FALLBACK_COLOR: &str = "#000000";

/// Parses a `#rrggbb` hex color into its RGB channels.
///
/// The leading `#` is optional. Returns `None` for anything that is not
/// exactly six hex digits.
///
/// # Example
///
/// ```rust
/// use veneer::color::parse_hex;
///
/// assert_eq!(parse_hex("#2563EB"), Some((37, 99, 235)));
/// assert_eq!(parse_hex("linear-gradient(...)"), None);
/// ```
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Converts a hex color to an `rgba(r, g, b, a)` string.
///
/// Returns `None` when the input is not a hex color, so callers can fall
/// back to the raw value instead of producing garbage.
pub fn hex_to_rgba(color: &str, opacity: f64) -> Option<String> {
    let (r, g, b) = parse_hex(color)?;
    Some(format!("rgba({r}, {g}, {b}, {opacity})"))
}

/// Lightens (positive percent) or darkens (negative percent) a hex color.
///
/// The percent maps to an additive per-channel delta of `round(2.55 * p)`,
/// clamped to the valid channel range. Non-hex inputs are returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use veneer::color::adjust;
///
/// assert_eq!(adjust("#808080", 10), "#9a9a9a");
/// assert_eq!(adjust("#000000", -20), "#000000");
/// ```
pub fn adjust(color: &str, percent: i32) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => {
            let delta = (2.55 * percent as f64).round() as i32;
            let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
            format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
        }
        None => color.to_string(),
    }
}

/// Perceived brightness of an RGB color in `[0, 1]`.
///
/// Uses the `0.299R + 0.587G + 0.114B` perceptual approximation, which is
/// sufficient for picking a readable text color.
pub fn perceived_luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0
}

/// Picks black or white text for the given background color.
///
/// Returns `None` when the background is not a hex color and no contrast
/// judgement can be made.
pub fn contrast_text(background: &str) -> Option<&'static str> {
    let (r, g, b) = parse_hex(background)?;
    if perceived_luminance(r, g, b) > 0.5 {
        Some("#000000")
    } else {
        Some("#ffffff")
    }
}

/// Extracts every CSS color found in a string, in order of appearance.
///
/// Recognizes `#rrggbb` hex colors and `rgb(...)`/`rgba(...)` spans. Used
/// for gradient normalization and gradient-string parsing.
pub(crate) fn extract_colors(value: &str) -> Vec<String> {
    let bytes = value.as_bytes();
    let mut colors = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' {
            if let Some(candidate) = value.get(i + 1..i + 7) {
                if candidate.bytes().all(|b| b.is_ascii_hexdigit()) {
                    colors.push(format!("#{candidate}"));
                    i += 7;
                    continue;
                }
            }
        } else if bytes[i] == b'r' {
            if let Some(rest) = value.get(i..) {
                if rest.starts_with("rgba(") || rest.starts_with("rgb(") {
                    if let Some(end) = rest.find(')') {
                        colors.push(rest[..=end].to_string());
                        i += end + 1;
                        continue;
                    }
                }
            }
        }
        i += 1;
    }
    colors
}

/// Extracts the hex colors from a string, skipping `rgb(...)` spans.
pub(crate) fn extract_hex_colors(value: &str) -> Vec<String> {
    extract_colors(value)
        .into_iter()
        .filter(|c| c.starts_with('#'))
        .collect()
}

/// Extracts the first `<N>deg` angle from a gradient string.
pub(crate) fn extract_angle(value: &str) -> Option<i32> {
    let bytes = value.as_bytes();
    for (at, _) in value.match_indices("deg") {
        let mut start = at;
        while start > 0 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        if start < at {
            if let Ok(angle) = value[start..at].parse::<i32>() {
                return Some(angle);
            }
        }
    }
    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn adjust_always_yields_valid_hex(r: u8, g: u8, b: u8, percent in -200i32..200) {
            let input = format!("#{r:02x}{g:02x}{b:02x}");
            let adjusted = adjust(&input, percent);
            prop_assert!(parse_hex(&adjusted).is_some(), "not a hex color: {}", adjusted);
        }

        #[test]
        fn parse_hex_round_trips(r: u8, g: u8, b: u8) {
            let input = format!("#{r:02x}{g:02x}{b:02x}");
            prop_assert_eq!(parse_hex(&input), Some((r, g, b)));
        }

        #[test]
        fn extract_colors_never_panics(value in "\\PC*") {
            let _ = extract_colors(&value);
            let _ = extract_angle(&value);
        }
    }
}
