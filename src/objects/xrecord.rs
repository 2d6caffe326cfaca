//! Xrecord object.

/// One value in an xrecord, typed by the DXF group code range it was
/// stored under.
#[derive(Debug, Clone, PartialEq)]
pub enum XRecordValue {
    String(String),
    Double(f64),
    Point([f64; 3]),
    Short(i16),
    Long(i32),
    LongLong(i64),
    Bool(bool),
    Binary(Vec<u8>),
    Handle(u64),
}

/// A typed property bag used by applications to persist arbitrary data.
#[derive(Debug, Clone, Default)]
pub struct XRecord {
    /// 0 not applicable, 1 keep, 2 use clone, 3 xref name, 4 mangle.
    pub duplicate_cloning: i16,
    /// Group code and value pairs in stored order.
    pub values: Vec<(i16, XRecordValue)>,
}

impl XRecord {
    /// First value stored under `code`, if any.
    pub fn first(&self, code: i16) -> Option<&XRecordValue> {
        self.values.iter().find(|(c, _)| *c == code).map(|(_, v)| v)
    }
}
