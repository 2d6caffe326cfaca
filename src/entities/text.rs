//! Single-line text and block attribute entities.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A single line of text.
///
/// `insertion` is the first alignment point; `alignment` is the second one
/// and is only meaningful when a non-default justification is set.
#[derive(Debug, Clone)]
pub struct Text {
    pub common: EntityCommon,
    pub elevation: f64,
    pub insertion: Vector2,
    pub alignment: Vector2,
    pub normal: Vector3,
    pub thickness: f64,
    pub oblique_angle: f64,
    pub rotation: f64,
    pub height: f64,
    pub width_factor: f64,
    pub value: String,
    /// Bit 2 backward, bit 4 upside down.
    pub generation: i16,
    pub horizontal_alignment: i16,
    pub vertical_alignment: i16,
    pub style: ObjectRef,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            elevation: 0.0,
            insertion: Vector2::ZERO,
            alignment: Vector2::ZERO,
            normal: Vector3::UNIT_Z,
            thickness: 0.0,
            oblique_angle: 0.0,
            rotation: 0.0,
            height: 0.0,
            width_factor: 1.0,
            value: String::new(),
            generation: 0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
            style: ObjectRef::Null,
        }
    }
}

impl Text {
    pub fn is_backward(&self) -> bool {
        self.generation & 2 != 0
    }

    pub fn is_upside_down(&self) -> bool {
        self.generation & 4 != 0
    }
}

/// An attribute instance attached to a block insert.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    /// The textual part, shared with TEXT.
    pub text: Text,
    pub tag: String,
    pub field_length: i16,
    /// Bit 1 invisible, bit 2 constant, bit 4 verify, bit 8 preset.
    pub flags: u8,
}

impl Attribute {
    pub fn is_invisible(&self) -> bool {
        self.flags & 1 != 0
    }

    pub fn is_constant(&self) -> bool {
        self.flags & 2 != 0
    }
}

/// An attribute template stored inside a block definition.
#[derive(Debug, Clone, Default)]
pub struct AttributeDefinition {
    pub text: Text,
    pub tag: String,
    pub prompt: String,
    pub field_length: i16,
    pub flags: u8,
}
