//! Raw handle references.
//!
//! Stored handles are reference descriptors, not object identities. The
//! first byte packs the reference kind in the high nibble and the number of
//! value bytes in the low nibble: `|KIND (4 bits)|COUNT (4 bits)|VALUE (N)|`.
//! Offset kinds are meaningful only relative to the handle of the object
//! that stores them.

use crate::error::{DecodeError, Result};

/// The reference kind of a stored handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandleKind {
    /// Undefined reference (code 0), absolute
    Undefined = 0,
    /// Soft ownership reference (code 2), absolute
    SoftOwnership = 2,
    /// Hard ownership reference (code 3), absolute
    HardOwnership = 3,
    /// Soft pointer reference (code 4), absolute
    SoftPointer = 4,
    /// Hard pointer reference (code 5), absolute
    HardPointer = 5,
    /// Referrer handle + 1 (code 6)
    PlusOne = 6,
    /// Referrer handle - 1 (code 8)
    MinusOne = 8,
    /// Referrer handle + value (code 0xA)
    PlusOffset = 0xA,
    /// Referrer handle - value (code 0xC)
    MinusOffset = 0xC,
}

impl HandleKind {
    /// Decode a raw kind code, rejecting undefined codes.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(HandleKind::Undefined),
            2 => Ok(HandleKind::SoftOwnership),
            3 => Ok(HandleKind::HardOwnership),
            4 => Ok(HandleKind::SoftPointer),
            5 => Ok(HandleKind::HardPointer),
            6 => Ok(HandleKind::PlusOne),
            8 => Ok(HandleKind::MinusOne),
            0xA => Ok(HandleKind::PlusOffset),
            0xC => Ok(HandleKind::MinusOffset),
            _ => Err(DecodeError::InvalidHandleCode(code)),
        }
    }

    /// Whether this kind carries an absolute handle value.
    pub fn is_absolute(&self) -> bool {
        matches!(
            self,
            HandleKind::Undefined
                | HandleKind::SoftOwnership
                | HandleKind::HardOwnership
                | HandleKind::SoftPointer
                | HandleKind::HardPointer
        )
    }
}

/// A raw handle reference as read from the stream.
///
/// Must be resolved against the referencing object's handle to yield an
/// absolute handle when the kind is offset-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRef {
    /// The reference kind.
    pub kind: HandleKind,
    /// Number of value bytes that followed the form byte.
    pub counter: u8,
    /// The raw value, assembled big-endian from `counter` bytes.
    pub value: u64,
}

impl HandleRef {
    /// Create a new handle reference.
    pub fn new(kind: HandleKind, counter: u8, value: u64) -> Self {
        Self {
            kind,
            counter,
            value,
        }
    }

    /// An absolute null reference.
    pub const NULL: HandleRef = HandleRef {
        kind: HandleKind::Undefined,
        counter: 0,
        value: 0,
    };

    /// Resolve the absolute handle given the referencing object's handle.
    pub fn resolve(&self, referrer: u64) -> u64 {
        match self.kind {
            HandleKind::PlusOne => referrer.wrapping_add(1),
            HandleKind::MinusOne => referrer.wrapping_sub(1),
            HandleKind::PlusOffset => referrer.wrapping_add(self.value),
            HandleKind::MinusOffset => referrer.wrapping_sub(self.value),
            _ => self.value,
        }
    }
}

impl Default for HandleRef {
    fn default() -> Self {
        HandleRef::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_code() {
        assert_eq!(HandleKind::from_code(2).unwrap(), HandleKind::SoftOwnership);
        assert_eq!(HandleKind::from_code(5).unwrap(), HandleKind::HardPointer);
        assert!(matches!(
            HandleKind::from_code(7),
            Err(DecodeError::InvalidHandleCode(7))
        ));
    }

    #[test]
    fn test_is_absolute() {
        assert!(HandleKind::SoftOwnership.is_absolute());
        assert!(HandleKind::HardPointer.is_absolute());
        assert!(!HandleKind::PlusOne.is_absolute());
        assert!(!HandleKind::MinusOffset.is_absolute());
    }

    #[test]
    fn test_resolve_absolute() {
        let r = HandleRef::new(HandleKind::SoftPointer, 2, 0x1A);
        assert_eq!(r.resolve(0x50), 0x1A);
    }

    #[test]
    fn test_resolve_offsets() {
        assert_eq!(
            HandleRef::new(HandleKind::PlusOne, 0, 0).resolve(0x10),
            0x11
        );
        assert_eq!(
            HandleRef::new(HandleKind::MinusOne, 0, 0).resolve(0x10),
            0x0F
        );
        assert_eq!(
            HandleRef::new(HandleKind::PlusOffset, 1, 5).resolve(0x10),
            0x15
        );
        assert_eq!(
            HandleRef::new(HandleKind::MinusOffset, 1, 3).resolve(0x10),
            0x0D
        );
    }
}
