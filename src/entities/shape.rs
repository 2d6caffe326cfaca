//! Shape entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A glyph from a compiled shape file, placed by index into its style's
/// shape file.
#[derive(Debug, Clone)]
pub struct Shape {
    pub common: EntityCommon,
    pub insertion: Vector3,
    pub size: f64,
    pub rotation: f64,
    pub width_factor: f64,
    pub oblique_angle: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub shape_number: i16,
    pub style: ObjectRef,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            insertion: Vector3::ZERO,
            size: 1.0,
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            shape_number: 0,
            style: ObjectRef::Null,
        }
    }
}
