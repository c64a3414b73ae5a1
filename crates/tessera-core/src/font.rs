//! Font descriptors shared between widgets.

use serde::{Deserialize, Serialize};

/// Size class used when a widget is created with a font-size hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    /// Small text (toggle captions, matrix cells)
    #[default]
    Small,
    /// Medium text
    Medium,
    /// Large text (headings)
    Large,
}

impl FontSize {
    /// Pixel size for this class.
    #[must_use]
    pub const fn pixels(self) -> f32 {
        match self {
            Self::Small => 8.0,
            Self::Medium => 10.0,
            Self::Large => 12.0,
        }
    }
}

/// A font reference: family plus pixel size.
///
/// Widgets only carry the descriptor; loading and rasterising glyphs is up
/// to the rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font family name
    pub family: String,
    /// Size in pixels
    pub size: f32,
}

impl Font {
    /// Default family used when none is given.
    pub const DEFAULT_FAMILY: &'static str = "NewMedia Fett";

    /// Create a font descriptor.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size: size.max(1.0),
        }
    }

    /// Default family at the size of the given class.
    #[must_use]
    pub fn sized(size: FontSize) -> Self {
        Self::new(Self::DEFAULT_FAMILY, size.pixels())
    }

    /// Approximate advance width of `text` in pixels.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.6
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::sized(FontSize::default())
    }
}
