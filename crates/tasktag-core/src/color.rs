use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Opaque display color stored as a 32-bit ARGB value.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Color(pub u32);

impl Color {
    /// `#888888`
    pub const GRAY: Self = Self(0xFF88_8888);
    /// `#0000FF`
    pub const BLUE: Self = Self(0xFF00_00FF);
    /// `#00FF00`
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// `#FF0000`
    pub const RED: Self = Self(0xFFFF_0000);

    /// Build an opaque color from its RGB channels.
    #[must_use]
    pub const fn rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// RGB channels without alpha.
    #[must_use]
    pub const fn rgb_value(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

/// Error returned when a color string is not `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid color '{0}', expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Self::rgb(value)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.rgb_value())
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
