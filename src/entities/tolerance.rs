//! Geometric tolerance entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A feature control frame. `text` keeps the raw frame encoding.
#[derive(Debug, Clone)]
pub struct Tolerance {
    pub common: EntityCommon,
    pub text: String,
    pub insertion: Vector3,
    pub direction: Vector3,
    pub dim_style: ObjectRef,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            text: String::new(),
            insertion: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
            dim_style: ObjectRef::Null,
        }
    }
}
