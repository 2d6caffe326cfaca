//! Multiline text entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// Paragraph text. `value` keeps the raw inline formatting codes.
#[derive(Debug, Clone)]
pub struct MText {
    pub common: EntityCommon,
    pub insertion: Vector3,
    pub normal: Vector3,
    /// Direction of the text x axis.
    pub direction: Vector3,
    /// Reference rectangle width used for word wrap.
    pub rect_width: f64,
    pub text_height: f64,
    /// 1..=9, top-left to bottom-right.
    pub attachment: i16,
    /// 1 left to right, 3 top to bottom, 5 by style.
    pub drawing_direction: i16,
    /// Height of the laid-out text.
    pub extents_height: f64,
    /// Width of the laid-out text.
    pub extents_width: f64,
    pub value: String,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
    pub style: ObjectRef,
}

impl Default for MText {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            insertion: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            direction: Vector3::new(1.0, 0.0, 0.0),
            rect_width: 0.0,
            text_height: 0.0,
            attachment: 1,
            drawing_direction: 1,
            extents_height: 0.0,
            extents_width: 0.0,
            value: String::new(),
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            style: ObjectRef::Null,
        }
    }
}
