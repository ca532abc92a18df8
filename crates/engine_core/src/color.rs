//! Hex color parsing and sRGB conversion.

use thiserror::Error;

/// Errors produced when parsing a `#rrggbb` style color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Parse `#rgb` or `#rrggbb` into sRGB components in 0..1 with alpha 1.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 4], ColorError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::BadDigit(hex.to_string()));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::BadLength(hex.to_string())),
    };

    let mut rgb = [0.0f32; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let pair = expanded
            .get(i * 2..i * 2 + 2)
            .ok_or_else(|| ColorError::BadDigit(hex.to_string()))?;
        let value =
            u8::from_str_radix(pair, 16).map_err(|_| ColorError::BadDigit(hex.to_string()))?;
        *channel = value as f32 / 255.0;
    }

    Ok([rgb[0], rgb[1], rgb[2], 1.0])
}

/// Convert one sRGB-encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parse a hex color and convert it to linear RGBA for shading on an sRGB surface.
pub fn hex_to_linear(hex: &str) -> Result<[f32; 4], ColorError> {
    let [r, g, b, a] = parse_hex_color(hex)?;
    Ok([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a])
}
