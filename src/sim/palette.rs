//! Brick colors and their point values

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 24-bit RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);

    pub const fn rgb(value: u32) -> Self {
        Self(value & 0xFF_FF_FF)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }

    /// RGBA components in 0..=1 for the vertex pipeline
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b, alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("not a #RRGGBB color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// One palette slot: a brick color and what a brick of that color is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: Color,
    pub points: u32,
}

/// The fixed brick palette. Rows cycle through it by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            PaletteEntry { color: Color::rgb(0xF7931A), points: 10 },
            PaletteEntry { color: Color::rgb(0x627EEA), points: 20 },
            PaletteEntry { color: Color::rgb(0x26A17B), points: 5 },
            PaletteEntry { color: Color::rgb(0x3CC8C8), points: 15 },
            PaletteEntry { color: Color::rgb(0xF0B90B), points: 25 },
        ])
    }
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Entry for a grid row (cycles by row index)
    pub fn for_row(&self, row: usize) -> PaletteEntry {
        self.entries[row % self.entries.len()]
    }

    pub fn get(&self, index: usize) -> Option<PaletteEntry> {
        self.entries.get(index).copied()
    }

    /// Look up the entry that owns `color`
    pub fn find(&self, color: Color) -> Option<PaletteEntry> {
        self.entries.iter().copied().find(|e| e.color == color)
    }
}
