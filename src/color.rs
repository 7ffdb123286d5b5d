use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Straight (non-premultiplied) RGBA colour, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8([255, 255, 255, 255]);
    pub const BLACK: Rgba8 = Rgba8([0, 0, 0, 255]);

    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    /// `#rrggbb` for the colour channels only.
    pub fn rgb_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    pub fn opacity(self) -> f32 {
        self.alpha() as f32 / 255.0
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 255 {
            f.write_str(&self.rgb_hex())
        } else {
            write!(f, "{}{:02x}", self.rgb_hex(), self.alpha())
        }
    }
}

impl FromStr for Rgba8 {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || RenderError::InvalidColor(trimmed.to_string());
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let mut channels = [255u8; 4];
        for (idx, channel) in channels.iter_mut().take(hex.len() / 2).enumerate() {
            let pair = &hex[idx * 2..idx * 2 + 2];
            *channel = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Rgba8(channels))
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_string()
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(color: Rgba8) -> Self {
        image::Rgba(color.0)
    }
}
