//! Multiline entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// One vertex of a multiline with its per-element segment parameters.
#[derive(Debug, Clone, Default)]
pub struct MLineVertex {
    pub position: Vector3,
    pub direction: Vector3,
    pub miter_direction: Vector3,
    /// Per style element: segment parameters then area fill parameters.
    pub line_parameters: Vec<(Vec<f64>, Vec<f64>)>,
}

/// A multiline: parallel line elements drawn along a vertex path, styled
/// by an MLINESTYLE object.
#[derive(Debug, Clone)]
pub struct MLine {
    pub common: EntityCommon,
    pub scale: f64,
    /// 0 top, 1 zero (center), 2 bottom.
    pub justification: u8,
    pub base_point: Vector3,
    pub normal: Vector3,
    /// Bit 2 closed, bit 4 suppress start caps, bit 8 suppress end caps.
    pub flags: i16,
    pub style_element_count: u8,
    pub vertices: Vec<MLineVertex>,
    pub style: ObjectRef,
}

impl Default for MLine {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            scale: 1.0,
            justification: 0,
            base_point: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            flags: 0,
            style_element_count: 0,
            vertices: Vec::new(),
            style: ObjectRef::Null,
        }
    }
}

impl MLine {
    pub fn is_closed(&self) -> bool {
        self.flags & 2 != 0
    }
}
