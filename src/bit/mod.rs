//! Bit-packed stream primitives.
//!
//! All multi-bit fields are read most-significant-bit first from a byte
//! stream that is itself little-endian for raw scalar types. The reader and
//! writer here carry no format knowledge beyond the primitive encodings and
//! the version gates that select between them.

pub mod crc;
pub mod handle_ref;
pub mod reader;
pub mod writer;

pub use crc::crc16;
pub use handle_ref::{HandleKind, HandleRef};
pub use reader::BitReader;
pub use writer::BitWriter;
