//! Object map (handle section) decoder.
//!
//! The map is a run of big-endian sized chunks, each holding modular-char
//! deltas of handle and file offset pairs. Deltas reset at every chunk
//! boundary. A chunk of size 2 terminates the map.

use indexmap::IndexMap;

use crate::bit::crc16;
use crate::decoder::constants::MAX_CHUNK_SIZE;
use crate::error::{DecodeError, Result};

/// Handle to absolute file offset entries, in stored order.
pub type ObjectMap = IndexMap<u64, i64, ahash::RandomState>;

fn read_be_u16(data: &[u8], pos: usize) -> Result<u16> {
    if pos + 2 > data.len() {
        return Err(DecodeError::OutOfBounds {
            position: pos as u64,
            context: "object map chunk size",
        });
    }
    Ok(u16::from_be_bytes([data[pos], data[pos + 1]]))
}

/// Read a modular char from `data` starting at `*pos`, unsigned form.
fn read_mc(data: &[u8], pos: &mut usize) -> Result<u64> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *data.get(*pos).ok_or(DecodeError::OutOfBounds {
            position: *pos as u64,
            context: "object map handle delta",
        })?;
        *pos += 1;
        value |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 63 {
            return Err(DecodeError::Structural(
                "overlong modular char in object map".into(),
            ));
        }
    }
}

/// Read a modular char, signed form: the sign lives in bit 6 of the final
/// byte.
fn read_signed_mc(data: &[u8], pos: &mut usize) -> Result<i64> {
    let mut value: i64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *data.get(*pos).ok_or(DecodeError::OutOfBounds {
            position: *pos as u64,
            context: "object map offset delta",
        })?;
        *pos += 1;
        if byte & 0x80 == 0 {
            let negative = byte & 0x40 != 0;
            value |= ((byte & 0x3F) as i64) << shift;
            return Ok(if negative { -value } else { value });
        }
        value |= ((byte & 0x7F) as i64) << shift;
        shift += 7;
        if shift > 63 {
            return Err(DecodeError::Structural(
                "overlong modular char in object map".into(),
            ));
        }
    }
}

/// Decode the object map at `offset`.
///
/// When `validate_checksums` is set, each chunk's trailing CRC is checked
/// against the chunk contents (seed 0xC0C1 over the size and payload
/// bytes).
pub fn read_object_map(
    data: &[u8],
    offset: usize,
    validate_checksums: bool,
) -> Result<ObjectMap> {
    let mut map = ObjectMap::default();
    let mut pos = offset;

    loop {
        let chunk_start = pos;
        let size = read_be_u16(data, pos)? as usize;
        pos += 2;

        if size == 2 {
            break;
        }
        if size < 2 {
            return Err(DecodeError::Structural(format!(
                "object map chunk size {size} is below the size field itself"
            )));
        }

        // Payload excludes the size field; cap guards against a corrupt
        // length running past the real chunk grid.
        let payload_len = (size - 2).min(MAX_CHUNK_SIZE);
        let payload_end = chunk_start + 2 + payload_len;
        if payload_end > data.len() {
            return Err(DecodeError::OutOfBounds {
                position: chunk_start as u64,
                context: "object map chunk payload",
            });
        }

        // Deltas restart every chunk.
        let mut last_handle: u64 = 0;
        let mut last_offset: i64 = 0;

        while pos < payload_end {
            let handle_delta = read_mc(data, &mut pos)?;
            let offset_delta = read_signed_mc(data, &mut pos)?;

            last_handle = last_handle.wrapping_add(handle_delta);
            last_offset = last_offset.wrapping_add(offset_delta);

            // A zero delta would repeat the previous handle; skip it.
            if handle_delta > 0 {
                map.insert(last_handle, last_offset);
            }
        }

        let crc = read_be_u16(data, payload_end)?;
        pos = payload_end + 2;

        if validate_checksums {
            let actual = crc16(&data[chunk_start..payload_end], 0xC0C1);
            if actual != crc {
                return Err(DecodeError::CrcMismatch {
                    expected: crc,
                    actual,
                });
            }
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_mc(out: &mut Vec<u8>, mut value: u64) {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value > 0 {
                byte |= 0x80;
            }
            out.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    fn write_signed_mc(out: &mut Vec<u8>, value: i64) {
        let negative = value < 0;
        let mut value = value.unsigned_abs();
        let mut bytes = Vec::new();
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            bytes.push(byte);
            if value == 0 {
                break;
            }
        }
        // Sign bit lives in bit 6 of the last byte; borrow a byte if taken.
        if bytes.last().map(|b| b & 0x40 != 0).unwrap_or(false) {
            bytes.push(0);
        }
        if negative {
            let last = bytes.len() - 1;
            bytes[last] |= 0x40;
        }
        for i in 0..bytes.len() - 1 {
            out.push(bytes[i] | 0x80);
        }
        out.push(bytes[bytes.len() - 1]);
    }

    fn build_map(entries: &[(u64, i64)]) -> Vec<u8> {
        let mut payload = Vec::new();
        let mut last_handle = 0u64;
        let mut last_offset = 0i64;
        for &(handle, offset) in entries {
            write_mc(&mut payload, handle - last_handle);
            write_signed_mc(&mut payload, offset - last_offset);
            last_handle = handle;
            last_offset = offset;
        }

        let mut chunk = Vec::new();
        chunk.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        chunk.extend_from_slice(&payload);
        let crc = crc16(&chunk, 0xC0C1);
        chunk.extend_from_slice(&crc.to_be_bytes());

        // Terminator chunk.
        chunk.extend_from_slice(&2u16.to_be_bytes());
        let term_crc = crc16(&2u16.to_be_bytes(), 0xC0C1);
        chunk.extend_from_slice(&term_crc.to_be_bytes());
        chunk
    }

    #[test]
    fn empty_map_terminates() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&[0x00, 0x00]);
        let map = read_object_map(&data, 0, false).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn deltas_accumulate_within_a_chunk() {
        let data = build_map(&[(0x10, 0x100), (0x12, 0x240), (0x20, 0x200)]);
        let map = read_object_map(&data, 0, true).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&0x10], 0x100);
        assert_eq!(map[&0x12], 0x240);
        assert_eq!(map[&0x20], 0x200);
    }

    #[test]
    fn corrupt_crc_is_detected() {
        let mut data = build_map(&[(0x10, 0x100)]);
        // Flip a CRC byte of the first chunk.
        let n = data.len();
        data[n - 5] ^= 0xFF;
        assert!(matches!(
            read_object_map(&data, 0, true),
            Err(DecodeError::CrcMismatch { .. })
        ));
        // Without validation the same buffer parses.
        assert!(read_object_map(&data, 0, false).is_ok());
    }

    #[test]
    fn truncated_map_is_out_of_bounds() {
        let data = build_map(&[(0x10, 0x100)]);
        assert!(read_object_map(&data[..3], 0, false).is_err());
    }
}
