//! CSS color strings and packed pixel colors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),
    #[error("invalid rgb() color `{0}`")]
    InvalidFunction(String),
    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

/// One entry of a gradient: position `t` in `[0, 1]` and a CSS color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub t: f64,
    pub color: String,
}

impl ColorStop {
    pub fn new(t: f64, color: impl Into<String>) -> Self {
        Self { t, color: color.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack so the in-memory byte order is R, G, B, A, which is what
    /// canvas ImageData expects regardless of host endianness.
    #[inline]
    pub fn pack(self) -> u32 {
        u32::from_ne_bytes([self.r, self.g, self.b, self.a])
    }

    #[inline]
    pub fn unpack(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_ne_bytes();
        Self { r, g, b, a }
    }

    /// Component-wise linear blend, `s` in `[0, 1]`.
    pub fn lerp(self, other: Rgba, s: f64) -> Rgba {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * s).round().clamp(0.0, 255.0) as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn parse(s: &str) -> Result<Rgba, ColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_function(&lower).ok_or_else(|| ColorError::InvalidFunction(s.to_string()));
        }
        named(&lower).ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: nibble(3)? }),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
        _ => None,
    }
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)` with `a` in `[0, 1]`.
fn parse_function(s: &str) -> Option<Rgba> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    let name = s[..open].trim();
    let args: Vec<&str> = s[open + 1..close].split(',').map(str::trim).collect();
    let channel = |v: &str| v.parse::<f64>().ok().map(|x| x.round().clamp(0.0, 255.0) as u8);
    match (name, args.len()) {
        ("rgb", 3) => Some(Rgba::rgb(channel(args[0])?, channel(args[1])?, channel(args[2])?)),
        ("rgba", 4) => {
            let alpha = args[3].parse::<f64>().ok()?;
            Some(Rgba {
                r: channel(args[0])?,
                g: channel(args[1])?,
                b: channel(args[2])?,
                a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            })
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<Rgba> {
    Some(match name {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "cyan" => Rgba::rgb(0, 255, 255),
        "magenta" => Rgba::rgb(255, 0, 255),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        _ => return None,
    })
}
