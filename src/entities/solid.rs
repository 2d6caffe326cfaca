//! Solid and trace entities.

use crate::entities::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A filled quadrilateral (SOLID) or traced band (TRACE); both share the
/// same stored body. The third and fourth corners are stored in the
/// crossed order the format uses.
#[derive(Debug, Clone)]
pub struct Solid {
    pub common: EntityCommon,
    pub thickness: f64,
    pub elevation: f64,
    pub corners: [Vector2; 4],
    pub normal: Vector3,
}

impl Default for Solid {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            thickness: 0.0,
            elevation: 0.0,
            corners: [Vector2::ZERO; 4],
            normal: Vector3::UNIT_Z,
        }
    }
}
