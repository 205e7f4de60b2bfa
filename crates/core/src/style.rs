//! Level-to-style mapping used at render time.
//!
//! Styles are never stored in a show file. Every item carries only its
//! nesting level and the style is looked up from a [`StyleTable`] that the
//! caller passes into each draw call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Font family used by the built-in style table.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A font face at a concrete point size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

/// Visual attributes for one nesting level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Horizontal indent in design pixels.
    pub indent: i32,
    pub color: Color,
    /// Font family name.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Unscaled font size in points.
    pub font_size: f32,
    /// Space above the item in design pixels.
    pub leading: i32,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Style {
    /// Create a style using the default font family.
    pub fn new(indent: i32, color: Color, font_size: f32, leading: i32) -> Self {
        Self {
            indent,
            color,
            font_family: default_font_family(),
            font_size,
            leading,
        }
    }

    /// The font for this style, scaled for the current drawing area.
    pub fn font(&self, scale: f32) -> Font {
        Font {
            family: self.font_family.clone(),
            size: self.font_size * scale,
        }
    }
}

/// Ordered table of styles indexed by item level.
///
/// Levels past the end of the table use the last entry, so deeply nested
/// items still render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Style>", into = "Vec<Style>")]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl StyleTable {
    /// Build a table from per-level styles. The table must not be empty.
    pub fn new(styles: Vec<Style>) -> Result<Self> {
        if styles.is_empty() {
            return Err(Error::Unsupported(
                "style table needs at least one style".to_string(),
            ));
        }
        Ok(Self { styles })
    }

    /// Look up the style for a nesting level.
    pub fn style_for(&self, level: u32) -> &Style {
        let index = (level as usize).min(self.styles.len() - 1);
        &self.styles[index]
    }

    /// Number of distinct levels in the table.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: vec![
                Style::new(0, Color::RED, 48.0, 20),
                Style::new(20, Color::BLUE, 40.0, 10),
                Style::new(50, Color::BLACK, 36.0, 10),
                Style::new(70, Color::BLACK, 30.0, 10),
                Style::new(90, Color::BLACK, 24.0, 10),
            ],
        }
    }
}

impl TryFrom<Vec<Style>> for StyleTable {
    type Error = Error;

    fn try_from(styles: Vec<Style>) -> Result<Self> {
        Self::new(styles)
    }
}

impl From<StyleTable> for Vec<Style> {
    fn from(table: StyleTable) -> Self {
        table.styles
    }
}
