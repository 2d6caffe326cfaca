//! Graphical entity bodies.
//!
//! Each entity struct holds the fields of its stored body plus the shared
//! [`EntityCommon`] block. References to other objects (layer, linetype,
//! owning block) are [`ObjectRef`] values resolved by the link pass.

mod arc;
mod block;
mod circle;
mod dimension;
mod ellipse;
mod face3d;
mod hatch;
mod insert;
mod leader;
mod line;
mod lwpolyline;
mod mline;
mod modeler;
mod mtext;
mod ole2frame;
mod point;
mod polyline;
mod ray;
mod shape;
mod solid;
mod spline;
mod text;
mod tolerance;
mod unknown;
mod vertex;
mod viewport;

pub use arc::Arc;
pub use block::{Block, EndBlock, SeqEnd};
pub use circle::Circle;
pub use dimension::{Dimension, DimensionKind};
pub use ellipse::Ellipse;
pub use face3d::Face3D;
pub use hatch::{
    BoundaryEdge, BoundaryPath, BoundaryPathFlags, GradientFill, Hatch, HatchDefinitionLine,
    HatchPattern,
};
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use lwpolyline::LwPolyline;
pub use mline::{MLine, MLineVertex};
pub use modeler::ModelerGeometry;
pub use mtext::MText;
pub use ole2frame::Ole2Frame;
pub use point::Point;
pub use polyline::{PolyfaceMesh, PolygonMesh, Polyline2D, Polyline3D};
pub use ray::{Ray, XLine};
pub use shape::Shape;
pub use solid::Solid;
pub use spline::Spline;
pub use text::{Attribute, AttributeDefinition, Text};
pub use tolerance::Tolerance;
pub use unknown::UnknownEntity;
pub use vertex::{Vertex2D, Vertex3D, VertexPfaceFace};
pub use viewport::Viewport;

use crate::document::ObjectRef;
use crate::types::{Color, Transparency};

/// Fields every entity shares, decoded between the object header and the
/// type-specific body.
#[derive(Debug, Clone)]
pub struct EntityCommon {
    /// Placement mode: 0 owned by a block, 1 model space, 2 paper space.
    pub entity_mode: u8,
    /// Layer the entity sits on.
    pub layer: ObjectRef,
    /// Linetype selector: 0 by layer, 1 by block, 2 continuous, 3 handle.
    pub linetype_flags: u8,
    /// Explicit linetype, when `linetype_flags` is 3.
    pub linetype: ObjectRef,
    /// Plot style selector, same coding as `linetype_flags`.
    pub plotstyle_flags: u8,
    /// Explicit plot style, when `plotstyle_flags` is 3.
    pub plotstyle: ObjectRef,
    pub color: Color,
    pub transparency: Transparency,
    pub linetype_scale: f64,
    /// Raw invisibility flags; bit 0 means invisible.
    pub invisibility: i16,
    /// Raw lineweight code.
    pub lineweight: u8,
    /// Previous entity in the owner's pre-2004 linked list.
    pub prev_entity: ObjectRef,
    /// Next entity in the owner's pre-2004 linked list.
    pub next_entity: ObjectRef,
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self {
            entity_mode: 0,
            layer: ObjectRef::Null,
            linetype_flags: 0,
            linetype: ObjectRef::Null,
            plotstyle_flags: 0,
            plotstyle: ObjectRef::Null,
            color: Color::ByLayer,
            transparency: Transparency::BY_LAYER,
            linetype_scale: 1.0,
            invisibility: 0,
            lineweight: 0,
            prev_entity: ObjectRef::Null,
            next_entity: ObjectRef::Null,
        }
    }
}

impl EntityCommon {
    pub fn is_invisible(&self) -> bool {
        self.invisibility & 1 != 0
    }

    pub fn in_paper_space(&self) -> bool {
        self.entity_mode == 1
    }
}
