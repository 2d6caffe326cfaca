//! Symbol table control objects.

use crate::document::ObjectRef;

/// Which symbol table a control object heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableControlKind {
    Block,
    Layer,
    TextStyle,
    LineType,
    View,
    Ucs,
    VPort,
    AppId,
    DimStyle,
    VpEntityHeader,
}

/// The head object of a symbol table, owning its record entries.
#[derive(Debug, Clone)]
pub struct TableControl {
    pub kind: TableControlKind,
    pub entries: Vec<ObjectRef>,
    /// Model space block header, only on the block table.
    pub model_space: ObjectRef,
    /// Paper space block header, only on the block table.
    pub paper_space: ObjectRef,
    /// ByLayer linetype, only on the linetype table.
    pub bylayer: ObjectRef,
    /// ByBlock linetype, only on the linetype table.
    pub byblock: ObjectRef,
}

impl TableControl {
    pub fn new(kind: TableControlKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            model_space: ObjectRef::Null,
            paper_space: ObjectRef::Null,
            bylayer: ObjectRef::Null,
            byblock: ObjectRef::Null,
        }
    }
}
