//! Fixed byte patterns and limits of the classic container layout.

/// Start sentinel of the drawing variables section.
pub const HEADER_START: [u8; 16] = [
    0xCF, 0x7B, 0x1F, 0x23, 0xFD, 0xDE, 0x38, 0xA9, 0x5F, 0x7C, 0x68, 0xB8, 0x4E, 0x6D, 0x33,
    0x5F,
];

/// End sentinel of the drawing variables section.
pub const HEADER_END: [u8; 16] = [
    0x30, 0x84, 0xE0, 0xDC, 0x02, 0x21, 0xC7, 0x56, 0xA0, 0x83, 0x97, 0x47, 0xB1, 0x92, 0xCC,
    0xA0,
];

/// Start sentinel of the class definitions section.
pub const CLASSES_START: [u8; 16] = [
    0x8D, 0xA1, 0xC4, 0xB8, 0xC4, 0xA9, 0xF8, 0xC5, 0xC0, 0xDC, 0xF4, 0x5F, 0xE7, 0xCF, 0xB6,
    0x8A,
];

/// End sentinel of the class definitions section.
pub const CLASSES_END: [u8; 16] = [
    0x72, 0x5E, 0x3B, 0x47, 0x3B, 0x56, 0x07, 0x3A, 0x3F, 0x23, 0x0B, 0xA0, 0x18, 0x30, 0x49,
    0x75,
];

/// Sentinel closing the file header record table.
pub const FILE_HEADER_END: [u8; 16] = [
    0x95, 0xA0, 0x4E, 0x28, 0x99, 0x82, 0x1A, 0xE5, 0x5E, 0x41, 0xE0, 0x5F, 0x9D, 0x3A, 0x4D,
    0x00,
];

/// Section locator indices in the classic file header.
pub mod locator {
    pub const HEADER: usize = 0;
    pub const CLASSES: usize = 1;
    pub const HANDLES: usize = 2;
    pub const OBJ_FREE_SPACE: usize = 3;
    pub const TEMPLATE: usize = 4;
    pub const AUX_HEADER: usize = 5;
}

/// Maximum payload of a single object map chunk, in bytes.
pub const MAX_CHUNK_SIZE: usize = 2032;

/// Reactor counts past this are treated as a misaligned stream.
pub const MAX_REACTOR_COUNT: usize = 10_000;
