//! Block header table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::Vector3;

/// A block definition record, owning the block's entity run.
#[derive(Debug, Clone, Default)]
pub struct BlockHeader {
    pub record: TableRecordCommon,
    pub anonymous: bool,
    pub has_attribute_definitions: bool,
    pub is_xref: bool,
    pub is_xref_overlay: bool,
    pub xref_loaded: bool,
    pub base_point: Vector3,
    pub xref_path: String,
    /// Number of inserts of this block recorded at save time.
    pub insert_count: u8,
    pub description: String,
    pub preview: Vec<u8>,
    /// The BLOCK entity.
    pub block_entity: ObjectRef,
    /// First entity of the pre-2004 linked list.
    pub first_entity: ObjectRef,
    /// Last entity of the pre-2004 linked list.
    pub last_entity: ObjectRef,
    /// Directly owned entities (2004 and later files).
    pub entities: Vec<ObjectRef>,
    /// The ENDBLK entity.
    pub end_block_entity: ObjectRef,
    pub inserts: Vec<ObjectRef>,
    pub layout: ObjectRef,
}

impl BlockHeader {
    /// Convenience accessor used throughout the crate.
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_model_space(&self) -> bool {
        self.record.name.eq_ignore_ascii_case("*Model_Space")
    }

    pub fn is_paper_space(&self) -> bool {
        self.record.name.eq_ignore_ascii_case("*Paper_Space")
    }
}
