//! Color types and sequential color interpolators.
//!
//! Colors arrive in configuration documents as CSS hex literals (`"#376770"`)
//! and leave as CSS color strings in the rendered output.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Neutral grey used for marks whose color could not be resolved.
    pub const UNKNOWN: Self = Self::new(204, 204, 204, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse a CSS hex literal: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            8 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// CSS representation (`#rrggbb`, or `rgba(...)` when translucent).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Ten-color categorical palette (Tableau 10), used when no range is given.
pub const TABLEAU10: [Rgba; 10] = [
    Rgba::rgb(0x4e, 0x79, 0xa7),
    Rgba::rgb(0xf2, 0x8e, 0x2c),
    Rgba::rgb(0xe1, 0x57, 0x59),
    Rgba::rgb(0x76, 0xb7, 0xb2),
    Rgba::rgb(0x59, 0xa1, 0x4f),
    Rgba::rgb(0xed, 0xc9, 0x49),
    Rgba::rgb(0xaf, 0x7a, 0xa1),
    Rgba::rgb(0xff, 0x9d, 0xa7),
    Rgba::rgb(0x9c, 0x75, 0x5f),
    Rgba::rgb(0xba, 0xb0, 0xab),
];

/// Sequential color interpolator for continuous color axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolator {
    /// White to black.
    #[default]
    Greys,
    /// Sequential blues.
    Blues,
    /// Viridis (perceptually uniform, colorblind-safe).
    Viridis,
    /// Magma (perceptually uniform).
    Magma,
    /// Heat (black-red-yellow-white).
    Heat,
    /// Diverging red-blue.
    RedBlue,
}

impl Interpolator {
    /// Palette stops, evenly spaced over `[0, 1]`.
    #[must_use]
    pub fn stops(self) -> &'static [Rgba] {
        const GREYS: [Rgba; 2] = [Rgba::rgb(255, 255, 255), Rgba::rgb(0, 0, 0)];
        const BLUES: [Rgba; 5] = [
            Rgba::rgb(247, 251, 255),
            Rgba::rgb(198, 219, 239),
            Rgba::rgb(107, 174, 214),
            Rgba::rgb(33, 113, 181),
            Rgba::rgb(8, 48, 107),
        ];
        const VIRIDIS: [Rgba; 5] = [
            Rgba::rgb(68, 1, 84),
            Rgba::rgb(59, 82, 139),
            Rgba::rgb(33, 145, 140),
            Rgba::rgb(94, 201, 98),
            Rgba::rgb(253, 231, 37),
        ];
        const MAGMA: [Rgba; 5] = [
            Rgba::rgb(0, 0, 4),
            Rgba::rgb(81, 18, 124),
            Rgba::rgb(183, 55, 121),
            Rgba::rgb(252, 137, 97),
            Rgba::rgb(252, 253, 191),
        ];
        const HEAT: [Rgba; 6] = [
            Rgba::rgb(0, 0, 0),
            Rgba::rgb(128, 0, 0),
            Rgba::rgb(255, 0, 0),
            Rgba::rgb(255, 128, 0),
            Rgba::rgb(255, 255, 0),
            Rgba::rgb(255, 255, 255),
        ];
        const RED_BLUE: [Rgba; 5] = [
            Rgba::rgb(178, 24, 43),
            Rgba::rgb(239, 138, 98),
            Rgba::rgb(247, 247, 247),
            Rgba::rgb(103, 169, 207),
            Rgba::rgb(33, 102, 172),
        ];

        match self {
            Interpolator::Greys => &GREYS,
            Interpolator::Blues => &BLUES,
            Interpolator::Viridis => &VIRIDIS,
            Interpolator::Magma => &MAGMA,
            Interpolator::Heat => &HEAT,
            Interpolator::RedBlue => &RED_BLUE,
        }
    }

    /// Color at position `t` in `[0, 1]` (clamped).
    #[must_use]
    pub fn interpolate(self, t: f64) -> Rgba {
        let colors = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;

        if colors.len() == 1 {
            return colors[0];
        }

        let segment_count = colors.len() - 1;
        let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f32 - segment as f32;

        colors[segment].lerp(colors[segment + 1], local_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_from_hex_six_digits() {
        let c = Rgba::from_hex("#376770").unwrap();
        assert_eq!(c, Rgba::rgb(0x37, 0x67, 0x70));
    }

    #[test]
    fn test_from_hex_short_form() {
        assert_eq!(Rgba::from_hex("#FFF").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::from_hex("#f00").unwrap(), Rgba::RED);
    }

    #[test]
    fn test_from_hex_with_alpha() {
        let c = Rgba::from_hex("#00000080").unwrap();
        assert_eq!(c.a, 0x80);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Rgba::from_hex("376770").is_err());
        assert!(Rgba::from_hex("#37677").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_css_round_trip() {
        let c = Rgba::rgb(0xc7, 0x2c, 0x43);
        assert_eq!(c.to_css(), "#c72c43");
        assert_eq!(c.to_css().parse::<Rgba>().unwrap(), c);
        assert!(c.with_alpha(128).to_css().starts_with("rgba("));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let c: Rgba = serde_json::from_str("\"#59D0F4\"").unwrap();
        assert_eq!(c, Rgba::rgb(0x59, 0xd0, 0xf4));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#59d0f4\"");
    }

    #[test]
    fn test_interpolator_endpoints() {
        assert_eq!(Interpolator::Greys.interpolate(0.0), Rgba::WHITE);
        assert_eq!(Interpolator::Greys.interpolate(1.0), Rgba::BLACK);
        assert_eq!(Interpolator::Greys.interpolate(-3.0), Rgba::WHITE);
        assert_eq!(Interpolator::Greys.interpolate(f64::NAN), Rgba::WHITE);
    }

    #[test]
    fn test_interpolator_midpoint_grey() {
        let mid = Interpolator::Greys.interpolate(0.5);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_interpolator_serde_names() {
        let i: Interpolator = serde_json::from_str("\"viridis\"").unwrap();
        assert_eq!(i, Interpolator::Viridis);
        let i: Interpolator = serde_json::from_str("\"redblue\"").unwrap();
        assert_eq!(i, Interpolator::RedBlue);
    }
}
