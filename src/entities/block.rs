//! Block begin and end marker entities.

use crate::entities::EntityCommon;

/// The BLOCK entity that opens a block definition's entity run.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub common: EntityCommon,
    pub name: String,
}

/// The ENDBLK entity closing a block definition.
#[derive(Debug, Clone, Default)]
pub struct EndBlock {
    pub common: EntityCommon,
}

/// The SEQEND entity terminating a vertex or attribute sequence.
#[derive(Debug, Clone, Default)]
pub struct SeqEnd {
    pub common: EntityCommon,
}
