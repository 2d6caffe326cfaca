//! Ray and construction line entities.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A half-infinite line from a base point along a unit direction.
#[derive(Debug, Clone)]
pub struct Ray {
    pub common: EntityCommon,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            base_point: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
        }
    }
}

/// An infinite construction line through a base point.
#[derive(Debug, Clone)]
pub struct XLine {
    pub common: EntityCommon,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl Default for XLine {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            base_point: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
        }
    }
}
