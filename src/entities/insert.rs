//! Block insert entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A placement of a block definition, optionally as a rows-by-columns
/// array (MINSERT). Attached attributes follow between the insert and its
/// SEQEND.
#[derive(Debug, Clone)]
pub struct Insert {
    pub common: EntityCommon,
    pub insertion: Vector3,
    pub scale: Vector3,
    pub rotation: f64,
    pub normal: Vector3,
    pub block_header: ObjectRef,
    pub has_attributes: bool,
    pub first_attribute: ObjectRef,
    pub last_attribute: ObjectRef,
    /// Attribute entities owned by this insert, filled by walking the
    /// entity chain.
    pub attributes: Vec<ObjectRef>,
    pub seqend: ObjectRef,
    /// Column count when this is an MINSERT, otherwise 1.
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
}

impl Default for Insert {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            insertion: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            normal: Vector3::UNIT_Z,
            block_header: ObjectRef::Null,
            has_attributes: false,
            first_attribute: ObjectRef::Null,
            last_attribute: ObjectRef::Null,
            attributes: Vec::new(),
            seqend: ObjectRef::Null,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
        }
    }
}

impl Insert {
    pub fn is_array(&self) -> bool {
        self.column_count > 1 || self.row_count > 1
    }
}
