// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// A packed `0xAARRGGBB` color.
///
/// History documents store colors as a signed 32-bit integer holding these
/// bits, so opaque colors serialize as negative numbers. Deserialization also
/// accepts the unsigned spelling of the same bits, and integral numbers
/// written with a fractional part such as `-38037.0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "f64")]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Builds a color from its four channels.
    #[must_use]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }

    /// Builds an opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Converts to a renderer paint color.
    #[must_use]
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.red(), self.green(), self.blue(), self.alpha())
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb(#{:08X})", self.0)
    }
}

impl From<Argb> for i32 {
    fn from(color: Argb) -> Self {
        i32::from_ne_bytes(color.0.to_ne_bytes())
    }
}

impl From<i32> for Argb {
    fn from(bits: i32) -> Self {
        Self(u32::from_ne_bytes(bits.to_ne_bytes()))
    }
}

impl TryFrom<f64> for Argb {
    type Error = ColorRangeError;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the value is integral and range-checked before each cast"
    )]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(ColorRangeError(value));
        }
        if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value) {
            return Ok((value as i32).into());
        }
        if (0.0..=f64::from(u32::MAX)).contains(&value) {
            return Ok(Self(value as u32));
        }
        Err(ColorRangeError(value))
    }
}

impl From<Argb> for Color {
    fn from(color: Argb) -> Self {
        color.to_color()
    }
}

/// A serialized color was not an integer that fits in 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("color value {0} is not a 32-bit integer")]
pub struct ColorRangeError(pub f64);

#[cfg(test)]
mod tests {
    use super::Argb;

    #[test]
    fn channels_unpack() {
        let c = Argb(0xFFFF_6B6B);
        let channels = (c.alpha(), c.red(), c.green(), c.blue());
        assert_eq!(channels, (0xFF, 0xFF, 0x6B, 0x6B));
        assert_eq!(Argb::opaque(0xFF, 0x6B, 0x6B), c);
    }

    #[test]
    fn serializes_as_signed_bits() {
        let json = serde_json::to_string(&Argb(0xFFFF_6B6B)).unwrap();
        assert_eq!(json, "-38037");
        let back: Argb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Argb(0xFFFF_6B6B));
    }

    #[test]
    fn accepts_unsigned_spelling() {
        let c: Argb = serde_json::from_str("4294929259").unwrap();
        assert_eq!(c, Argb(0xFFFF_6B6B));
        assert!(serde_json::from_str::<Argb>("4294967296").is_err());
    }

    #[test]
    fn accepts_integral_floats_only() {
        let c: Argb = serde_json::from_str("-38037.0").unwrap();
        assert_eq!(c, Argb(0xFFFF_6B6B));
        let c: Argb = serde_json::from_str("4294929259.0").unwrap();
        assert_eq!(c, Argb(0xFFFF_6B6B));
        assert!(serde_json::from_str::<Argb>("-38037.5").is_err());
        assert!(serde_json::from_str::<Argb>("-2147483649").is_err());
    }
}
