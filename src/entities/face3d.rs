//! 3D face entity.

use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A three or four cornered face. A triangle repeats the third corner in
/// the fourth slot.
#[derive(Debug, Clone, Default)]
pub struct Face3D {
    pub common: EntityCommon,
    pub corners: [Vector3; 4],
    /// Bits 1..8 hide the corresponding edge.
    pub invisible_edges: i16,
}

impl Face3D {
    pub fn edge_visible(&self, i: usize) -> bool {
        self.invisible_edges & (1 << i) == 0
    }

    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }
}
