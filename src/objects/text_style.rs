//! Text style table record.

use crate::objects::TableRecordCommon;

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub record: TableRecordCommon,
    pub vertical: bool,
    /// Set for shape-file styles, which have no text name.
    pub is_shape_file: bool,
    /// Fixed height, 0 when height is free.
    pub height: f64,
    pub width_factor: f64,
    pub oblique_angle: f64,
    /// Bit 2 backward, bit 4 upside down.
    pub generation_flags: u8,
    pub last_height: f64,
    pub font_file: String,
    pub bigfont_file: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            vertical: false,
            is_shape_file: false,
            height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            generation_flags: 0,
            last_height: 0.0,
            font_file: String::new(),
            bigfont_file: String::new(),
        }
    }
}

impl TextStyle {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
