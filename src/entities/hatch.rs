//! Hatch entity.

use bitflags::bitflags;

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::{Color, Vector2, Vector3};

bitflags! {
    /// How a boundary path was built and how it participates in the fill.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BoundaryPathFlags: i32 {
        const EXTERNAL = 0x01;
        const POLYLINE = 0x02;
        const DERIVED = 0x04;
        const TEXTBOX = 0x08;
        const OUTERMOST = 0x10;
    }
}

/// One edge of a non-polyline boundary path.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryEdge {
    Line {
        start: Vector2,
        end: Vector2,
    },
    /// Angles in radians; `counter_clockwise` flips their direction.
    Arc {
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    EllipticArc {
        center: Vector2,
        major_axis: Vector2,
        axis_ratio: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Spline {
        degree: i32,
        rational: bool,
        periodic: bool,
        knots: Vec<f64>,
        control_points: Vec<Vector2>,
        weights: Vec<f64>,
    },
}

/// A closed loop bounding the hatched area.
#[derive(Debug, Clone, Default)]
pub struct BoundaryPath {
    pub flags: BoundaryPathFlags,
    /// Set when the path came from a polyline.
    pub polyline_vertices: Vec<(Vector2, f64)>,
    pub polyline_closed: bool,
    pub edges: Vec<BoundaryEdge>,
    /// Source entities the boundary was derived from.
    pub source_entities: Vec<ObjectRef>,
}

impl BoundaryPath {
    pub fn is_polyline(&self) -> bool {
        self.flags.contains(BoundaryPathFlags::POLYLINE)
    }
}

/// One line family of a hatch pattern definition.
#[derive(Debug, Clone, Default)]
pub struct HatchDefinitionLine {
    pub angle: f64,
    pub base: Vector2,
    pub offset: Vector2,
    pub dashes: Vec<f64>,
}

/// Pattern fill parameters.
#[derive(Debug, Clone)]
pub struct HatchPattern {
    pub angle: f64,
    pub scale: f64,
    pub double: bool,
    pub lines: Vec<HatchDefinitionLine>,
}

impl Default for HatchPattern {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            double: false,
            lines: Vec::new(),
        }
    }
}

/// Gradient fill parameters.
#[derive(Debug, Clone, Default)]
pub struct GradientFill {
    pub angle: f64,
    pub shift: f64,
    pub single_color: bool,
    pub tint: f64,
    pub name: String,
    /// Stop value and color pairs.
    pub colors: Vec<(f64, Color)>,
}

/// An area fill bounded by one or more closed paths.
#[derive(Debug, Clone)]
pub struct Hatch {
    pub common: EntityCommon,
    pub elevation: f64,
    pub normal: Vector3,
    pub pattern_name: String,
    pub solid_fill: bool,
    pub associative: bool,
    pub paths: Vec<BoundaryPath>,
    /// 0 normal, 1 outer, 2 ignore.
    pub style: i16,
    /// 0 user, 1 predefined, 2 custom.
    pub pattern_type: i16,
    /// Pattern parameters for non-solid fills.
    pub pattern: Option<HatchPattern>,
    pub gradient: Option<GradientFill>,
    pub pixel_size: Option<f64>,
    pub seed_points: Vec<Vector2>,
}

impl Default for Hatch {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
            pattern_name: String::new(),
            solid_fill: false,
            associative: false,
            paths: Vec::new(),
            style: 0,
            pattern_type: 1,
            pattern: None,
            gradient: None,
            pixel_size: None,
            seed_points: Vec::new(),
        }
    }
}

impl Hatch {
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}
