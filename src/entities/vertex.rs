//! Vertex entities owned by the heavyweight polylines.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A 2D polyline vertex.
#[derive(Debug, Clone)]
pub struct Vertex2D {
    pub common: EntityCommon,
    /// Bit 1 extra vertex, bit 2 curve fit, bit 8 spline fit, bit 16
    /// spline frame control point.
    pub flags: u8,
    pub position: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    pub tangent_direction: f64,
}

impl Default for Vertex2D {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            flags: 0,
            position: Vector3::ZERO,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            tangent_direction: 0.0,
        }
    }
}

/// A 3D polyline or mesh vertex.
#[derive(Debug, Clone, Default)]
pub struct Vertex3D {
    pub common: EntityCommon,
    pub flags: u8,
    pub position: Vector3,
}

/// A face record of a polyface mesh; indices are 1-based into the mesh's
/// vertex list, negative values mean the edge is invisible.
#[derive(Debug, Clone, Default)]
pub struct VertexPfaceFace {
    pub common: EntityCommon,
    pub indices: [i16; 4],
}

impl VertexPfaceFace {
    /// Vertex index of corner `i` ignoring the visibility sign.
    pub fn vertex_index(&self, i: usize) -> i16 {
        self.indices[i].abs()
    }

    pub fn edge_visible(&self, i: usize) -> bool {
        self.indices[i] >= 0
    }
}
