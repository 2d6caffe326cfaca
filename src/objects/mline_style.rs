//! Multiline style object.

use crate::types::Color;

/// One parallel element of a multiline style.
#[derive(Debug, Clone, Default)]
pub struct MLineStyleElement {
    /// Signed offset from the multiline axis.
    pub offset: f64,
    pub color: Color,
    /// Linetype index into the linetype table.
    pub linetype_index: i16,
}

/// Styling for MLINE entities: caps, fill and the parallel elements.
#[derive(Debug, Clone, Default)]
pub struct MLineStyle {
    pub name: String,
    pub description: String,
    /// Bit 1 fill on, bit 2 display miters, caps in the higher bits.
    pub flags: i16,
    pub fill_color: Color,
    /// Cap angles in radians.
    pub start_angle: f64,
    pub end_angle: f64,
    pub elements: Vec<MLineStyleElement>,
}

impl MLineStyle {
    pub fn fill_on(&self) -> bool {
        self.flags & 1 != 0
    }
}
