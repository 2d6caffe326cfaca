//! Registered application table record.

use crate::objects::TableRecordCommon;

/// A registered application name, referenced by extended object data.
#[derive(Debug, Clone, Default)]
pub struct AppId {
    pub record: TableRecordCommon,
    /// Unknown stored byte, kept as decoded.
    pub unknown: u8,
}

impl AppId {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
