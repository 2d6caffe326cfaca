//! Error types for the DWG decoder.

use std::io;
use thiserror::Error;

/// Main error type for decode operations.
///
/// `Structural` failures abort the whole decode; everything else is either
/// converted into a per-object `Errored` record or recorded as a
/// notification before decoding continues, depending on where it occurs.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// IO error occurred while loading the input buffer
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file is structurally unreadable (no section directory, no object
    /// map, or truncated before the minimum header). No document is produced.
    #[error("Structural error: {0}")]
    Structural(String),

    /// Unsupported DWG version tag
    #[error("Unsupported DWG version: {0:?}")]
    UnsupportedVersion(String),

    /// A read ran past the end of the stream
    #[error("Out of bounds read at bit {position}: {context}")]
    OutOfBounds { position: u64, context: &'static str },

    /// A 16-byte section sentinel did not match
    #[error("Sentinel mismatch: {0}")]
    SentinelMismatch(&'static str),

    /// CRC checksum mismatch
    #[error("CRC mismatch: expected {expected:#06X}, got {actual:#06X}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// A handle reference carried an undefined kind code
    #[error("Invalid handle reference code: {0:#X}")]
    InvalidHandleCode(u8),

    /// A handle lookup failed
    #[error("Object not found: handle {0:#X}")]
    ObjectNotFound(u64),

    /// A field held a value outside its legal range
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Text bytes could not be decoded with the file codepage
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    /// Whether this error must abort the whole decode rather than degrade
    /// a single object.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DecodeError::Structural(_) | DecodeError::UnsupportedVersion(_) | DecodeError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::UnsupportedVersion("AC1009".to_string());
        assert_eq!(err.to_string(), "Unsupported DWG version: \"AC1009\"");
    }

    #[test]
    fn test_crc_error() {
        let err = DecodeError::CrcMismatch {
            expected: 0x1234,
            actual: 0x5678,
        };
        assert!(err.to_string().contains("0x1234"));
        assert!(err.to_string().contains("0x5678"));
    }

    #[test]
    fn test_structural_classification() {
        assert!(DecodeError::Structural("empty buffer".into()).is_structural());
        assert!(!DecodeError::OutOfBounds {
            position: 12,
            context: "bit short",
        }
        .is_structural());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DecodeError = io_err.into();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
