//! Linetype table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;

/// One dash, dot or embedded shape of a linetype pattern.
#[derive(Debug, Clone, Default)]
pub struct LineTypeDash {
    /// Dash length; 0 for a dot, negative for a gap.
    pub length: f64,
    pub shape_code: i16,
    pub x_offset: f64,
    pub y_offset: f64,
    pub scale: f64,
    pub rotation: f64,
    /// Bit 1 rotation is absolute, bit 2 element is text, bit 4 shape.
    pub flags: i16,
    /// Embedded text for text elements.
    pub text: String,
    /// Style of an embedded shape or text element.
    pub style: ObjectRef,
}

#[derive(Debug, Clone, Default)]
pub struct LineType {
    pub record: TableRecordCommon,
    pub description: String,
    pub pattern_length: f64,
    pub alignment: u8,
    pub dashes: Vec<LineTypeDash>,
}

impl LineType {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_continuous(&self) -> bool {
        self.dashes.is_empty()
    }
}
