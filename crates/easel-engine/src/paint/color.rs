use std::fmt;

use serde::{Deserialize, Serialize};

/// Straight-alpha sRGB color, one byte per channel.
///
/// In config files a color is written as `[r, g, b]` or `[r, g, b, a]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::Length(digits.len()));
        }
        let byte = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ColorParseError::Digit(digits.to_string()))
        };
        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Method form of [`lerp`].
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        lerp(self, other, t)
    }
}

/// Linear interpolation between `a` and `b`.
///
/// `t` is clamped to `[0, 1]` (NaN counts as 0). Each channel, alpha included,
/// is `a + (b - a) * t` rounded to the nearest integer.
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let channel = |from: u8, to: u8| {
        let from = f32::from(from);
        let v = from + (f32::from(to) - from) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
        a: channel(a.a, b.a),
    }
}

/// Error from [`Color::from_hex`] or from a malformed config array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Length(usize),
    Digit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Length(n) => {
                write!(f, "expected 3 or 4 channels (6 or 8 hex digits), got {n}")
            }
            ColorParseError::Digit(s) => write!(f, "invalid hex color `{s}`"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl TryFrom<Vec<u8>> for Color {
    type Error = ColorParseError;

    fn try_from(v: Vec<u8>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            other => Err(ColorParseError::Length(other.len())),
        }
    }
}

impl From<Color> for Vec<u8> {
    fn from(c: Color) -> Self {
        vec![c.r, c.g, c.b, c.a]
    }
}
