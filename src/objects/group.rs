//! Group object.

use crate::document::ObjectRef;

/// A named selection of entities, owned by the ACAD_GROUP dictionary.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub description: String,
    pub unnamed: bool,
    pub selectable: bool,
    pub members: Vec<ObjectRef>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
