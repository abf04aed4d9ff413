//! Display colours assigned to todos at creation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Largest 24-bit RGB value
const MAX_RGB: u32 = 0x00FF_FFFF;

/// A colour string that is not 1-6 hex digits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color tag: {0:?}")]
pub struct InvalidColorTag(pub String);

/// A 24-bit colour, displayed and serialized as `#rrggbb`
///
/// Parsing is lenient about short values: `#abc` is read as the number
/// `0xabc` and becomes `#000abc`, since older stored lists were written
/// without zero padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorTag(u32);

impl ColorTag {
    /// Build from a packed `0xRRGGBB` value; higher bits are dropped
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & MAX_RGB)
    }

    /// The packed `0xRRGGBB` value
    #[must_use]
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Parse `#rrggbb`, `rrggbb`, or a shorter unpadded hex value
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColorTag`] unless the input (minus an optional `#`)
    /// is 1 to 6 hex digits.
    pub fn parse(input: &str) -> Result<Self, InvalidColorTag> {
        let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
        if digits.is_empty()
            || digits.len() > 6
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(InvalidColorTag(input.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| InvalidColorTag(input.to_string()))
    }
}

impl std::fmt::Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl std::str::FromStr for ColorTag {
    type Err = InvalidColorTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorTag {
    type Error = InvalidColorTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorTag> for String {
    fn from(tag: ColorTag) -> Self {
        tag.to_string()
    }
}

/// Source of colours for new todos
pub trait ColorSource: Send + Sync {
    /// Colour for the next created todo
    fn next_color(&self) -> ColorTag;
}

/// Uniformly random colours, with no collision avoidance or contrast guarantee
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColors;

impl ColorSource for RandomColors {
    fn next_color(&self) -> ColorTag {
        ColorTag::from_rgb(rand::thread_rng().gen_range(0..=MAX_RGB))
    }
}

/// Cycles through a fixed palette, for hosts that need predictable or accessible colours
#[derive(Debug)]
pub struct PaletteColors {
    palette: Vec<ColorTag>,
    next: AtomicUsize,
}

impl PaletteColors {
    /// Create a source cycling through `palette`; an empty palette yields black
    #[must_use]
    pub const fn new(palette: Vec<ColorTag>) -> Self {
        Self {
            palette,
            next: AtomicUsize::new(0),
        }
    }
}

impl ColorSource for PaletteColors {
    fn next_color(&self) -> ColorTag {
        if self.palette.is_empty() {
            return ColorTag::from_rgb(0);
        }
        let position = self.next.fetch_add(1, Ordering::Relaxed) % self.palette.len();
        self.palette[position]
    }
}
