//! Spline entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A NURBS curve stored either as control points and knots (scenario 1)
/// or as fit points with end tangents (scenario 2).
#[derive(Debug, Clone)]
pub struct Spline {
    pub common: EntityCommon,
    /// 1 control points and knots, 2 fit points.
    pub scenario: i16,
    pub degree: i32,
    pub normal: Vector3,
    pub rational: bool,
    pub closed: bool,
    pub periodic: bool,
    pub knot_tolerance: f64,
    pub control_tolerance: f64,
    pub fit_tolerance: f64,
    pub start_tangent: Vector3,
    pub end_tangent: Vector3,
    pub knots: Vec<f64>,
    pub control_points: Vec<Vector3>,
    /// One weight per control point for rational splines, else empty.
    pub weights: Vec<f64>,
    pub fit_points: Vec<Vector3>,
}

impl Default for Spline {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            scenario: 1,
            degree: 3,
            normal: Vector3::UNIT_Z,
            rational: false,
            closed: false,
            periodic: false,
            knot_tolerance: 1e-7,
            control_tolerance: 1e-7,
            fit_tolerance: 1e-10,
            start_tangent: Vector3::ZERO,
            end_tangent: Vector3::ZERO,
            knots: Vec::new(),
            control_points: Vec::new(),
            weights: Vec::new(),
            fit_points: Vec::new(),
        }
    }
}

impl Spline {
    pub fn has_fit_data(&self) -> bool {
        self.scenario == 2
    }
}
