//! Hex color parsing and background selection.

use crate::error::IconError;
use image::{Rgb, Rgba};
use std::fmt;
use std::str::FromStr;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Parse a `#RRGGBB` (or bare `RRGGBB`) string into an opaque RGB triple.
///
/// Shorthand (`#fff`) and alpha (`#RRGGBBAA`) forms are rejected.
pub fn parse_hex_color(text: &str) -> Result<Rgb<u8>, IconError> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IconError::InvalidColorFormat(text.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| IconError::InvalidColorFormat(text.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Format an RGB triple as an uppercase `#RRGGBB` string.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Canvas fill: fully transparent, or an opaque color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Rgb<u8>),
}

impl Background {
    /// RGBA fill for the canvas. Transparent uses white channels with zero alpha.
    pub fn fill(self) -> Rgba<u8> {
        match self {
            Background::Transparent => Rgba([255, 255, 255, 0]),
            Background::Solid(Rgb([r, g, b])) => Rgba([r, g, b, 255]),
        }
    }

    pub fn is_opaque(self) -> bool {
        matches!(self, Background::Solid(_))
    }

    /// Color to flatten over when a platform forbids transparency.
    pub fn solid_or_white(self) -> Rgb<u8> {
        match self {
            Background::Transparent => WHITE,
            Background::Solid(color) => color,
        }
    }
}

impl FromStr for Background {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            Ok(Background::Transparent)
        } else {
            parse_hex_color(s).map(Background::Solid)
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Transparent => f.write_str("transparent"),
            Background::Solid(color) => f.write_str(&to_hex(*color)),
        }
    }
}
