//! UCS table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::Vector3;

/// A named user coordinate system.
#[derive(Debug, Clone)]
pub struct Ucs {
    pub record: TableRecordCommon,
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub elevation: f64,
    pub ortho_type: i16,
    pub base_ucs: ObjectRef,
    pub named_ucs: ObjectRef,
}

impl Default for Ucs {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            origin: Vector3::ZERO,
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
            elevation: 0.0,
            ortho_type: 0,
            base_ucs: ObjectRef::Null,
            named_ucs: ObjectRef::Null,
        }
    }
}

impl Ucs {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
