//! OLE2 frame entity.

use crate::entities::EntityCommon;

/// An embedded OLE object; the payload is carried as opaque bytes.
#[derive(Debug, Clone, Default)]
pub struct Ole2Frame {
    pub common: EntityCommon,
    pub ole_version: i16,
    pub data: Vec<u8>,
}
