//! Placeholder for objects of classes without a reader.

/// A class-coded object the decoder has no body reader for.
#[derive(Debug, Clone, Default)]
pub struct UnknownObject {
    /// DXF name from the class table, when the class was found.
    pub dxf_name: String,
    /// The stored object bytes, MS size excluded.
    pub raw: Vec<u8>,
}
