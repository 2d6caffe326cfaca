//! Dictionary object.

use crate::document::ObjectRef;

/// A name to object map; the root of the named object tree.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// 0 not applicable, 1 keep, 2 use clone, 3 xref name, 4 mangle.
    pub duplicate_cloning: i16,
    pub hard_owner: bool,
    /// Entries in stored order.
    pub entries: Vec<(String, ObjectRef)>,
}

impl Dictionary {
    /// Case-insensitive entry lookup.
    pub fn get(&self, name: &str) -> Option<ObjectRef> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|&(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let dict = Dictionary {
            entries: vec![("ACAD_GROUP".into(), ObjectRef::from_handle(0x10))],
            ..Default::default()
        };
        assert_eq!(dict.get("acad_group"), Some(ObjectRef::from_handle(0x10)));
        assert_eq!(dict.get("missing"), None);
    }
}
