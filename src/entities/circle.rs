//! Circle entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A full circle defined by center, radius and extrusion normal.
#[derive(Debug, Clone)]
pub struct Circle {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            radius: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Circle {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self {
            center,
            radius,
            ..Default::default()
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_measures() {
        let c = Circle::new(Vector3::new(1.0, 2.0, 0.0), 5.0);
        assert!((c.diameter() - 10.0).abs() < 1e-12);
        assert!((c.area() - 78.53981633974483).abs() < 1e-9);
    }
}
