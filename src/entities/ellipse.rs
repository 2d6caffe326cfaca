//! Ellipse entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// An ellipse or elliptical arc.
///
/// `major_axis` is the vector from the center to the major axis endpoint;
/// start and end parameters are radians along the curve, 0 to 2pi for a
/// full ellipse.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub common: EntityCommon,
    pub center: Vector3,
    pub major_axis: Vector3,
    pub normal: Vector3,
    /// Minor to major axis length ratio.
    pub axis_ratio: f64,
    pub start_parameter: f64,
    pub end_parameter: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            major_axis: Vector3::new(1.0, 0.0, 0.0),
            normal: Vector3::UNIT_Z,
            axis_ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: std::f64::consts::TAU,
        }
    }
}

impl Ellipse {
    pub fn is_full(&self) -> bool {
        (self.end_parameter - self.start_parameter - std::f64::consts::TAU).abs() < 1e-9
    }

    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_axis.length() * self.axis_ratio
    }
}
