//! ARGB color values.
//!
//! Colors are written as `#aarrggbb` (lowercase hex, alpha first). When
//! reading, the short forms `#rgb` and `#rrggbb` (opaque) are accepted too.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DecodeError;

/// A 32-bit color with an alpha channel.
///
/// # Examples
///
/// ```rust
/// use sexpression::Color;
///
/// let red: Color = "#ff0000".parse().unwrap();
/// assert_eq!(red, Color::rgb(255, 0, 0));
/// assert_eq!(red.to_string(), "#ffff0000");
///
/// let glass = Color::argb(0x80, 0x11, 0x22, 0x33);
/// assert_eq!(glass.to_string(), "#80112233");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[must_use]
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Color {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color::argb(255, red, green, blue)
    }

    #[inline]
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.alpha == 255
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.alpha, self.red, self.green, self.blue
        )
    }
}

impl FromStr for Color {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(DecodeError::InvalidColor)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidColor);
        }

        // all ASCII from here on, so byte slicing is safe
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| DecodeError::InvalidColor)
        };
        let short = |index: usize| channel(index..index + 1).map(|v| v * 17);

        match hex.len() {
            3 => Ok(Color::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::argb(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(DecodeError::InvalidColor),
        }
    }
}
