//! Arc entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A circular arc. Angles are radians, counter-clockwise from the
/// extrusion-plane x axis.
#[derive(Debug, Clone)]
pub struct Arc {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            radius: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
        }
    }
}

impl Arc {
    /// Swept angle in radians, normalized to [0, 2pi).
    pub fn sweep(&self) -> f64 {
        let mut sweep = self.end_angle - self.start_angle;
        while sweep < 0.0 {
            sweep += std::f64::consts::TAU;
        }
        sweep % std::f64::consts::TAU
    }

    pub fn arc_length(&self) -> f64 {
        self.radius * self.sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_wraps_through_zero() {
        let arc = Arc {
            start_angle: 3.0 * std::f64::consts::FRAC_PI_2,
            end_angle: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        };
        assert!((arc.sweep() - std::f64::consts::PI).abs() < 1e-12);
    }
}
