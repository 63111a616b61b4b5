//! Hex colors and linear blending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fully transparent 8-digit color used for hidden elements.
pub const HIDDEN: &str = "#00000000";

/// Errors from parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// An opaque 24-bit RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Linear per-channel interpolation: `round(a + ratio * (b - a))`.
///
/// `ratio = 0` yields `a` and `ratio = 1` yields `b` exactly. Halves round up.
/// The ratio is not clamped; callers pass values within `0..=1`.
pub fn blend(a: Rgb, b: Rgb, ratio: f64) -> Rgb {
    Rgb::new(
        blend_channel(a.r, b.r, ratio),
        blend_channel(a.g, b.g, ratio),
        blend_channel(a.b, b.b, ratio),
    )
}

fn blend_channel(a: u8, b: u8, ratio: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + ratio * (b - a) + 0.5).floor() as u8
}

/// A paint instruction: a solid color, or the transparent "hidden" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Solid(Rgb),
    Hidden,
}

impl Paint {
    /// Blend a solid paint toward `target`. Hidden stays hidden.
    pub fn toward(self, target: Rgb, ratio: f64) -> Paint {
        match self {
            Paint::Solid(c) => Paint::Solid(blend(c, target, ratio)),
            Paint::Hidden => Paint::Hidden,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Paint::Hidden)
    }
}

impl From<Rgb> for Paint {
    fn from(c: Rgb) -> Self {
        Paint::Solid(c)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Solid(c) => c.fmt(f),
            Paint::Hidden => f.write_str(HIDDEN),
        }
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
