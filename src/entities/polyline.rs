//! Heavyweight polyline entities.
//!
//! These store their vertices as separately mapped VERTEX entities; the
//! `vertices` list is filled from the owned handle run and the sequence
//! ends with a SEQEND.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A 2D polyline with width, bulge and curve fitting support.
#[derive(Debug, Clone)]
pub struct Polyline2D {
    pub common: EntityCommon,
    /// Bit 1 closed, bit 2 curve fit, bit 4 spline fit.
    pub flags: i16,
    /// 5 quadratic spline, 6 cubic spline, 8 bezier.
    pub curve_type: i16,
    pub start_width: f64,
    pub end_width: f64,
    pub thickness: f64,
    pub elevation: f64,
    pub normal: Vector3,
    /// First vertex of the owned chain, as stored.
    pub first_vertex: ObjectRef,
    /// Last vertex of the owned chain, as stored.
    pub last_vertex: ObjectRef,
    /// All owned vertices, filled by walking the entity chain.
    pub vertices: Vec<ObjectRef>,
    pub seqend: ObjectRef,
}

impl Default for Polyline2D {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            flags: 0,
            curve_type: 0,
            start_width: 0.0,
            end_width: 0.0,
            thickness: 0.0,
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
            first_vertex: ObjectRef::Null,
            last_vertex: ObjectRef::Null,
            vertices: Vec::new(),
            seqend: ObjectRef::Null,
        }
    }
}

impl Polyline2D {
    pub fn is_closed(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// A 3D polyline.
#[derive(Debug, Clone, Default)]
pub struct Polyline3D {
    pub common: EntityCommon,
    /// Bit 1 spline fit from the stored curve byte.
    pub curve_flags: u8,
    /// Bit 1 closed from the stored spline byte.
    pub spline_flags: u8,
    pub first_vertex: ObjectRef,
    pub last_vertex: ObjectRef,
    pub vertices: Vec<ObjectRef>,
    pub seqend: ObjectRef,
}

impl Polyline3D {
    pub fn is_closed(&self) -> bool {
        self.spline_flags & 1 != 0
    }
}

/// A polyface mesh: a vertex pool followed by face records.
#[derive(Debug, Clone, Default)]
pub struct PolyfaceMesh {
    pub common: EntityCommon,
    pub vertex_count: i16,
    pub face_count: i16,
    pub first_vertex: ObjectRef,
    pub last_vertex: ObjectRef,
    /// Vertices first, then face records, in stored order.
    pub vertices: Vec<ObjectRef>,
    pub seqend: ObjectRef,
}

/// An m-by-n polygon mesh.
#[derive(Debug, Clone, Default)]
pub struct PolygonMesh {
    pub common: EntityCommon,
    /// Bit 1 closed in m, bit 32 closed in n, bit 4 smoothed.
    pub flags: i16,
    pub curve_type: i16,
    pub m_vertex_count: i16,
    pub n_vertex_count: i16,
    pub m_density: i16,
    pub n_density: i16,
    pub first_vertex: ObjectRef,
    pub last_vertex: ObjectRef,
    pub vertices: Vec<ObjectRef>,
    pub seqend: ObjectRef,
}

impl PolygonMesh {
    pub fn is_closed_m(&self) -> bool {
        self.flags & 1 != 0
    }

    pub fn is_closed_n(&self) -> bool {
        self.flags & 32 != 0
    }
}
