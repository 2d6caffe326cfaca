//! Placeholder for entities of classes without a reader.

use crate::entities::EntityCommon;

/// A class-coded entity the decoder has no body reader for. The common
/// data is decoded normally; the stored object bytes are kept raw.
#[derive(Debug, Clone, Default)]
pub struct UnknownEntity {
    pub common: EntityCommon,
    /// DXF name from the class table, when the class was found.
    pub dxf_name: String,
    /// The stored object bytes, MS size excluded.
    pub raw: Vec<u8>,
}
