//! Line entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A straight segment between two 3D points.
#[derive(Debug, Clone)]
pub struct Line {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Line {
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn midpoint(&self) -> Vector3 {
        Vector3::new(
            (self.start.x + self.end.x) * 0.5,
            (self.start.y + self.end.y) * 0.5,
            (self.start.z + self.end.z) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_length() {
        let l = Line::new(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0));
        assert!((l.length() - 5.0).abs() < 1e-12);
    }
}
