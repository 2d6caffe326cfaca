//! Point entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone)]
pub struct Point {
    pub common: EntityCommon,
    pub location: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
    /// Rotation of the UCS x axis at save time, used for PDMODE glyphs.
    pub x_axis_angle: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            location: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            x_axis_angle: 0.0,
        }
    }
}
