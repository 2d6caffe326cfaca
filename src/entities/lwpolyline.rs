//! Lightweight polyline entity.

use crate::entities::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A lightweight polyline: inline 2D vertices with optional per-vertex
/// bulges and widths.
#[derive(Debug, Clone)]
pub struct LwPolyline {
    pub common: EntityCommon,
    pub closed: bool,
    pub constant_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub points: Vec<Vector2>,
    /// One bulge per segment when present, else empty.
    pub bulges: Vec<f64>,
    /// Start/end width pairs when present, else empty.
    pub widths: Vec<(f64, f64)>,
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            closed: false,
            constant_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            points: Vec::new(),
            bulges: Vec::new(),
            widths: Vec::new(),
        }
    }
}

impl LwPolyline {
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_count_open_vs_closed() {
        let mut p = LwPolyline::default();
        p.points = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
        ];
        assert_eq!(p.segment_count(), 2);
        p.closed = true;
        assert_eq!(p.segment_count(), 3);
    }
}
