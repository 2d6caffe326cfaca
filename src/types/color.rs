//! Color and transparency values as decoded from entity streams.
//!
//! Only the representations the wire format distinguishes are modeled;
//! palette interpretation belongs to the layers above.

use std::fmt;

/// An entity color as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index.
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            // Negative means the layer is frozen; keep the magnitude.
            _ if index < 0 => Color::Index((-index).min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a true color from RGB values.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Get the color index, if this is an indexed color.
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

/// An entity transparency alpha value (0 = opaque, 255 = transparent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Transparency(u8);

impl Transparency {
    /// Fully opaque
    pub const OPAQUE: Transparency = Transparency(0);

    /// Transparency by layer
    pub const BY_LAYER: Transparency = Transparency(0);

    /// Create a new transparency from an alpha value.
    pub const fn new(alpha: u8) -> Self {
        Transparency(alpha)
    }

    /// Decode the 32-bit transparency field.
    ///
    /// The top byte selects the kind: 0 = by layer, 1 = by block,
    /// 3 = explicit alpha in the low byte.
    pub fn from_alpha_value(value: u32) -> Self {
        match (value >> 24) as u8 {
            0 => Transparency::BY_LAYER,
            1 => Transparency::OPAQUE,
            3 => Transparency((value & 0xFF) as u8),
            _ => Transparency::OPAQUE,
        }
    }

    /// Get the raw alpha value.
    pub const fn alpha(&self) -> u8 {
        self.0
    }

    /// Encode as the 32-bit transparency field.
    pub fn to_alpha_value(&self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            (3u32 << 24) | self.0 as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(1), Color::Index(1));
        assert_eq!(Color::from_index(-3), Color::Index(3));
    }

    #[test]
    fn test_color_index() {
        assert_eq!(Color::Index(5).index(), Some(5));
        assert_eq!(Color::from_rgb(1, 2, 3).index(), None);
    }

    #[test]
    fn test_transparency_from_alpha_value() {
        assert_eq!(Transparency::from_alpha_value(0), Transparency::BY_LAYER);
        assert_eq!(
            Transparency::from_alpha_value(0x0300_0080).alpha(),
            0x80
        );
    }
}
