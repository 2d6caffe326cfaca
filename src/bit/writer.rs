//! Bit-level stream writer.
//!
//! The structural mirror of [`BitReader`](super::reader::BitReader),
//! sharing the same primitive set. Whole-document encoding is out of scope;
//! the writer exists for building section payloads and for exercising the
//! reader against exact inverses.

use crate::error::Result;
use crate::types::{Color, FileVersion, Transparency, Vector2, Vector3};

use super::handle_ref::HandleKind;

use encoding_rs::Encoding;

/// Bit-granular writer accumulating into an owned buffer.
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_shift: u8,
    last_byte: u8,
    encoding: &'static Encoding,
    version: FileVersion,
}

impl BitWriter {
    /// Create a new writer.
    pub fn new(version: FileVersion) -> Self {
        Self {
            buffer: Vec::new(),
            bit_shift: 0,
            last_byte: 0,
            encoding: encoding_rs::WINDOWS_1252,
            version,
        }
    }

    /// Get the format revision this writer encodes for.
    pub fn version(&self) -> FileVersion {
        self.version
    }

    /// Set the text encoding used for narrow strings.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// The bytes written so far (excluding any partial trailing byte).
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Pad the partial byte with zero bits and return the buffer.
    pub fn into_data(mut self) -> Vec<u8> {
        // Flushing is infallible on a Vec sink.
        let _ = self.write_spear_shift();
        self.buffer
    }

    /// Current absolute position in bits.
    pub fn position_in_bits(&self) -> i64 {
        self.buffer.len() as i64 * 8 + self.bit_shift as i64
    }

    fn reset_shift(&mut self) {
        self.bit_shift = 0;
        self.last_byte = 0;
    }

    /// Compute the number of bytes needed to encode a handle value.
    pub fn handle_byte_count(handle: u64) -> u8 {
        match handle {
            0 => 0,
            h => (8 - (h.leading_zeros() / 8)) as u8,
        }
    }

    // ---------------------------------------------------------------
    // Bit writes
    // ---------------------------------------------------------------

    /// Write a single bit (B).
    pub fn write_bit(&mut self, value: bool) -> Result<()> {
        if self.bit_shift < 7 {
            if value {
                self.last_byte |= 1 << (7 - self.bit_shift);
            }
            self.bit_shift += 1;
            return Ok(());
        }

        // Last bit in the byte.
        if value {
            self.last_byte |= 1;
        }
        self.buffer.push(self.last_byte);
        self.reset_shift();
        Ok(())
    }

    /// Write a 2-bit code (BB).
    pub fn write_2_bits(&mut self, value: u8) -> Result<()> {
        if self.bit_shift < 6 {
            self.last_byte |= value << (6 - self.bit_shift);
            self.bit_shift += 2;
        } else if self.bit_shift == 6 {
            self.last_byte |= value;
            self.buffer.push(self.last_byte);
            self.reset_shift();
        } else {
            // Spans the byte boundary.
            self.last_byte |= value >> 1;
            self.buffer.push(self.last_byte);
            self.last_byte = value << 7;
            self.bit_shift = 1;
        }
        Ok(())
    }

    /// Write a 3-bit code (3B).
    pub fn write_3_bits(&mut self, value: u8) -> Result<()> {
        self.write_bit((value & 4) != 0)?;
        self.write_bit((value & 2) != 0)?;
        self.write_bit((value & 1) != 0)?;
        Ok(())
    }

    /// Write a 4-bit nibble (4BITS).
    pub fn write_4_bits(&mut self, value: u8) -> Result<()> {
        self.write_2_bits((value >> 2) & 3)?;
        self.write_2_bits(value & 3)?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Raw writes
    // ---------------------------------------------------------------

    /// Write one byte (RC).
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        if self.bit_shift == 0 {
            self.buffer.push(value);
            return Ok(());
        }

        let shift = 8 - self.bit_shift;
        let combined = self.last_byte | (value >> self.bit_shift);
        self.buffer.push(combined);
        self.last_byte = value << shift;
        Ok(())
    }

    /// Write a byte slice.
    pub fn write_bytes(&mut self, arr: &[u8]) -> Result<()> {
        if self.bit_shift == 0 {
            self.buffer.extend_from_slice(arr);
            return Ok(());
        }

        for &b in arr {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Write a raw little-endian i16 (RS).
    pub fn write_raw_short(&mut self, value: i16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a raw little-endian u16.
    pub fn write_raw_ushort(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a raw little-endian i32 (RL).
    pub fn write_raw_long(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a raw little-endian u64 (RLL).
    pub fn write_raw_ulong(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a raw little-endian f64 (RD).
    pub fn write_raw_double(&mut self, value: f64) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write two raw doubles (2RD).
    pub fn write_2_raw_double(&mut self, value: Vector2) -> Result<()> {
        self.write_raw_double(value.x)?;
        self.write_raw_double(value.y)?;
        Ok(())
    }

    /// Write three raw doubles (3RD).
    pub fn write_3_raw_double(&mut self, value: Vector3) -> Result<()> {
        self.write_raw_double(value.x)?;
        self.write_raw_double(value.y)?;
        self.write_raw_double(value.z)?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Bit-coded scalars
    // ---------------------------------------------------------------

    /// Write a bit-coded short (BS).
    pub fn write_bit_short(&mut self, value: i16) -> Result<()> {
        if value == 0 {
            self.write_2_bits(2)?;
        } else if value > 0 && value < 256 {
            self.write_2_bits(1)?;
            self.write_byte(value as u8)?;
        } else if value == 256 {
            self.write_2_bits(3)?;
        } else {
            self.write_2_bits(0)?;
            self.write_byte(value as u8)?;
            self.write_byte((value >> 8) as u8)?;
        }
        Ok(())
    }

    /// Write a bit-coded long (BL).
    pub fn write_bit_long(&mut self, value: i32) -> Result<()> {
        if value == 0 {
            self.write_2_bits(2)?;
            return Ok(());
        }

        if value > 0 && value < 256 {
            self.write_2_bits(1)?;
            self.write_byte(value as u8)?;
            return Ok(());
        }

        self.write_2_bits(0)?;
        self.write_byte(value as u8)?;
        self.write_byte((value >> 8) as u8)?;
        self.write_byte((value >> 16) as u8)?;
        self.write_byte((value >> 24) as u8)?;
        Ok(())
    }

    /// Write a bit-coded long long (BLL).
    pub fn write_bit_long_long(&mut self, value: i64) -> Result<()> {
        let unsigned_value = value as u64;

        let mut size: u8 = 0;
        let mut hold = unsigned_value;
        while hold != 0 {
            hold >>= 8;
            size += 1;
        }

        self.write_3_bits(size)?;

        hold = unsigned_value;
        for _ in 0..size {
            self.write_byte((hold & 0xFF) as u8)?;
            hold >>= 8;
        }
        Ok(())
    }

    /// Write a bit-coded double (BD).
    pub fn write_bit_double(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            self.write_2_bits(3)?;
            return Ok(());
        }

        if value == 0.0 {
            self.write_2_bits(2)?;
            return Ok(());
        }

        if value == 1.0 {
            self.write_2_bits(1)?;
            return Ok(());
        }

        self.write_2_bits(0)?;
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a bit-coded double with default (DD).
    pub fn write_bit_double_with_default(&mut self, def: f64, value: f64) -> Result<()> {
        if def == value {
            self.write_2_bits(0)?;
            return Ok(());
        }

        let def_bytes = def.to_le_bytes();
        let value_bytes = value.to_le_bytes();

        // Count matching trailing bytes; they decide the patch width.
        let mut first = 0;
        let mut last: i32 = 7;
        while last >= 0 && def_bytes[last as usize] == value_bytes[last as usize] {
            first += 1;
            last -= 1;
        }

        if first >= 4 {
            self.write_2_bits(1)?;
            self.write_bytes(&value_bytes[0..4])?;
        } else if first >= 2 {
            self.write_2_bits(2)?;
            self.write_byte(value_bytes[4])?;
            self.write_byte(value_bytes[5])?;
            self.write_byte(value_bytes[0])?;
            self.write_byte(value_bytes[1])?;
            self.write_byte(value_bytes[2])?;
            self.write_byte(value_bytes[3])?;
        } else {
            self.write_2_bits(3)?;
            self.write_bytes(&value_bytes)?;
        }
        Ok(())
    }

    /// Write two bit-coded doubles (2BD).
    pub fn write_2_bit_double(&mut self, value: Vector2) -> Result<()> {
        self.write_bit_double(value.x)?;
        self.write_bit_double(value.y)?;
        Ok(())
    }

    /// Write three bit-coded doubles (3BD).
    pub fn write_3_bit_double(&mut self, value: Vector3) -> Result<()> {
        self.write_bit_double(value.x)?;
        self.write_bit_double(value.y)?;
        self.write_bit_double(value.z)?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Modular (compressed) integers
    // ---------------------------------------------------------------

    /// Write an unsigned modular char (MC).
    pub fn write_modular_char(&mut self, mut value: u64) -> Result<()> {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                self.write_byte(byte | 0x80)?;
            } else {
                self.write_byte(byte)?;
                return Ok(());
            }
        }
    }

    /// Write a signed modular char: the final byte carries the sign in
    /// bit 6 and at most 6 value bits.
    pub fn write_signed_modular_char(&mut self, value: i64) -> Result<()> {
        let neg = value < 0;
        let mut uval = value.unsigned_abs();

        loop {
            let mut byte = (uval & 0x7F) as u8;
            uval >>= 7;
            if uval == 0 && (byte & 0x40) == 0 {
                if neg {
                    byte |= 0x40;
                }
                self.write_byte(byte)?;
                return Ok(());
            }
            self.write_byte(byte | 0x80)?;
        }
    }

    /// Write a modular short (MS): 15 bits per little-endian byte pair.
    pub fn write_modular_short(&mut self, mut value: u32) -> Result<()> {
        loop {
            let low = (value & 0x7FFF) as u16;
            value >>= 15;
            let encoded = if value != 0 { low | 0x8000 } else { low };
            self.write_byte((encoded & 0xFF) as u8)?;
            self.write_byte((encoded >> 8) as u8)?;
            if value == 0 {
                return Ok(());
            }
        }
    }

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// Write a handle reference (H) with the given kind.
    pub fn write_handle_ref(&mut self, kind: HandleKind, handle: u64) -> Result<()> {
        let counter = Self::handle_byte_count(handle);
        self.write_byte(((kind as u8) << 4) | counter)?;

        // Value bytes go out big-endian.
        for i in (0..counter).rev() {
            self.write_byte(((handle >> (i as u32 * 8)) & 0xFF) as u8)?;
        }
        Ok(())
    }

    /// Write an absolute handle reference with the undefined kind.
    pub fn write_handle(&mut self, handle: u64) -> Result<()> {
        self.write_handle_ref(HandleKind::Undefined, handle)
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// Write a variable text field (TV / TU).
    pub fn write_variable_text(&mut self, value: &str) -> Result<()> {
        if value.is_empty() {
            self.write_bit_short(0)?;
            return Ok(());
        }

        if self.version.r2007_plus() {
            let utf16: Vec<u16> = value.encode_utf16().collect();
            self.write_bit_short(utf16.len() as i16)?;
            for ch in utf16 {
                self.write_bytes(&ch.to_le_bytes())?;
            }
        } else {
            let (encoded, _, _) = self.encoding.encode(value);
            self.write_bit_short(encoded.len() as i16)?;
            self.write_bytes(&encoded)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Sentinels
    // ---------------------------------------------------------------

    /// Write a 16-byte section sentinel.
    pub fn write_sentinel(&mut self, sentinel: &[u8; 16]) -> Result<()> {
        self.write_bytes(sentinel)
    }

    // ---------------------------------------------------------------
    // Colors
    // ---------------------------------------------------------------

    /// Write a CmColor value (CMC).
    pub fn write_cm_color(&mut self, value: Color) -> Result<()> {
        if self.version.r2004_plus() {
            // BS: color index (always 0 in this encoding)
            self.write_bit_short(0)?;

            let mut arr = [0u8; 4];
            match value {
                Color::Rgb { r, g, b } => {
                    arr[2] = r;
                    arr[1] = g;
                    arr[0] = b;
                    arr[3] = 0xC2;
                }
                Color::ByLayer | Color::ByBlock => {
                    arr[3] = 0xC0;
                }
                Color::Index(idx) => {
                    arr[3] = 0xC3;
                    arr[0] = idx;
                }
            }

            self.write_bit_long(i32::from_le_bytes(arr))?;

            // RC: no color name, no book name
            self.write_byte(0)?;
        } else {
            let index = match value {
                Color::ByBlock => 0,
                Color::ByLayer => 256,
                Color::Index(i) => i as i16,
                Color::Rgb { .. } => 7,
            };
            self.write_bit_short(index)?;
        }
        Ok(())
    }

    /// Write an entity color value (ENC).
    pub fn write_en_color(&mut self, color: Color, transparency: Transparency) -> Result<()> {
        if self.version.r2004_plus() {
            let is_by_block = matches!(color, Color::ByBlock);
            let is_by_layer = transparency == Transparency::BY_LAYER;
            let is_true_color = matches!(color, Color::Rgb { .. });

            if is_by_block && is_by_layer {
                self.write_bit_short(0)?;
                return Ok(());
            }

            let mut size: u16 = 0;
            if !is_by_layer {
                size |= 0x2000;
            }
            if is_true_color {
                size |= 0x8000;
            } else {
                let idx = match color {
                    Color::ByBlock => 0u16,
                    Color::ByLayer => 256,
                    Color::Index(i) => i as u16,
                    _ => 7,
                };
                size |= idx & 0x0FFF;
            }

            self.write_bit_short(size as i16)?;

            if let Color::Rgb { r, g, b } = color {
                let arr = [b, g, r, 0xC2u8];
                self.write_bit_long(u32::from_le_bytes(arr) as i32)?;
            }

            if !is_by_layer {
                self.write_bit_long(transparency.to_alpha_value() as i32)?;
            }
            Ok(())
        } else {
            self.write_cm_color(color)
        }
    }

    // ---------------------------------------------------------------
    // Special types
    // ---------------------------------------------------------------

    /// Write a raw object type code (OT).
    pub fn write_object_type(&mut self, value: i16) -> Result<()> {
        if self.version.r2010_plus() {
            if (0..=255).contains(&value) {
                self.write_2_bits(0)?;
                self.write_byte(value as u8)?;
            } else if (0x1F0..=0x2EF).contains(&value) {
                self.write_2_bits(1)?;
                self.write_byte((value - 0x1F0) as u8)?;
            } else {
                self.write_2_bits(2)?;
                self.write_bytes(&value.to_le_bytes())?;
            }
        } else {
            self.write_bit_short(value)?;
        }
        Ok(())
    }

    /// Write a bit-coded extrusion vector (BE).
    pub fn write_bit_extrusion(&mut self, normal: Vector3) -> Result<()> {
        if self.version.r2000_plus() {
            if normal == Vector3::UNIT_Z {
                self.write_bit(true)?;
            } else {
                self.write_bit(false)?;
                self.write_3_bit_double(normal)?;
            }
        } else {
            self.write_3_bit_double(normal)?;
        }
        Ok(())
    }

    /// Write a bit-coded thickness (BT).
    pub fn write_bit_thickness(&mut self, thickness: f64) -> Result<()> {
        if self.version.r2000_plus() {
            if thickness == 0.0 {
                self.write_bit(true)?;
            } else {
                self.write_bit(false)?;
                self.write_bit_double(thickness)?;
            }
        } else {
            self.write_bit_double(thickness)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Stream control
    // ---------------------------------------------------------------

    /// Flush the partial byte, padding the remaining bits with zeros.
    pub fn write_spear_shift(&mut self) -> Result<()> {
        if self.bit_shift > 0 {
            for _ in self.bit_shift..8 {
                self.write_bit(false)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit::reader::BitReader;
    use proptest::prelude::*;

    fn make_writer() -> BitWriter {
        BitWriter::new(FileVersion::Ac1015)
    }

    fn reader_over(data: &[u8]) -> BitReader<'_> {
        BitReader::new(data, FileVersion::Ac1015)
    }

    #[test]
    fn test_write_bit() {
        let mut w = make_writer();
        w.write_bit(true).unwrap();
        assert_eq!(w.into_data(), vec![0x80]);

        let mut w = make_writer();
        w.write_bit(false).unwrap();
        assert_eq!(w.into_data(), vec![0x00]);
    }

    #[test]
    fn test_write_2_bits() {
        let mut w = make_writer();
        w.write_2_bits(3).unwrap();
        assert_eq!(w.into_data(), vec![0xC0]);
    }

    #[test]
    fn test_write_byte_no_shift() {
        let mut w = make_writer();
        w.write_byte(0xAB).unwrap();
        assert_eq!(w.into_data(), vec![0xAB]);
    }

    #[test]
    fn test_write_bit_short_codes() {
        let mut w = make_writer();
        w.write_bit_short(0).unwrap();
        assert_eq!(w.into_data(), vec![0x80]);

        let mut w = make_writer();
        w.write_bit_short(256).unwrap();
        assert_eq!(w.into_data(), vec![0xC0]);

        // code 01 + byte 42: 0b01_001010 10_000000
        let mut w = make_writer();
        w.write_bit_short(42).unwrap();
        assert_eq!(w.into_data(), vec![0x4A, 0x80]);
    }

    #[test]
    fn test_roundtrip_bit_short() {
        for value in [0i16, 1, 42, 127, 255, 256, -1, 0x1234, i16::MAX, i16::MIN] {
            let mut w = make_writer();
            w.write_bit_short(value).unwrap();
            let data = w.into_data();
            assert_eq!(
                reader_over(&data).read_bit_short().unwrap(),
                value,
                "roundtrip failed for {value}"
            );
        }
    }

    #[test]
    fn test_roundtrip_bit_long() {
        for value in [0i32, 1, 42, 255, 0x12345678, -1, i32::MAX] {
            let mut w = make_writer();
            w.write_bit_long(value).unwrap();
            let data = w.into_data();
            assert_eq!(reader_over(&data).read_bit_long().unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_bit_long_long() {
        for value in [0i64, 1, 0xFF, 0x1234, 0xABCDEF, 0x1234_5678_9ABC] {
            let mut w = make_writer();
            w.write_bit_long_long(value).unwrap();
            let data = w.into_data();
            assert_eq!(reader_over(&data).read_bit_long_long().unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_bit_double() {
        for value in [0.0f64, 1.0, 3.14, -42.5, f64::MAX, f64::MIN_POSITIVE, -0.0] {
            let mut w = make_writer();
            w.write_bit_double(value).unwrap();
            let data = w.into_data();
            assert_eq!(reader_over(&data).read_bit_double().unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_bit_double_nan() {
        let mut w = make_writer();
        w.write_bit_double(f64::NAN).unwrap();
        let data = w.into_data();
        // NaN encodes as the 2-bit reserved code, no payload bytes.
        assert_eq!(data, vec![0xC0]);
        assert!(reader_over(&data).read_bit_double().unwrap().is_nan());
    }

    #[test]
    fn test_roundtrip_modular_char() {
        for value in [0u64, 1, 63, 64, 127, 128, 129, 0x3FFF, 0xFFFF_FFFF] {
            let mut w = make_writer();
            w.write_modular_char(value).unwrap();
            let data = w.into_data();
            assert_eq!(reader_over(&data).read_modular_char().unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_signed_modular_char() {
        for value in [0i64, 1, -1, 5, -5, 63, -63, 64, -64, 1413, -1413, 100_000] {
            let mut w = make_writer();
            w.write_signed_modular_char(value).unwrap();
            let data = w.into_data();
            assert_eq!(
                reader_over(&data).read_signed_modular_char().unwrap(),
                value,
                "roundtrip failed for {value}"
            );
        }
    }

    #[test]
    fn test_roundtrip_modular_short() {
        for value in [0u32, 16, 0x7FFF, 0x8000, 0x12345, 0x7FFF_FFFF & 0x3FFF_FFFF] {
            let mut w = make_writer();
            w.write_modular_short(value).unwrap();
            let data = w.into_data();
            assert_eq!(
                reader_over(&data).read_modular_short().unwrap() as u32,
                value
            );
        }
    }

    #[test]
    fn test_roundtrip_handle() {
        for handle in [0u64, 1, 0xFF, 0x1234, 0xABCDEF, 0x12345678] {
            let mut w = make_writer();
            w.write_handle_ref(HandleKind::SoftPointer, handle).unwrap();
            let data = w.into_data();
            let r = reader_over(&data).read_handle_ref().unwrap();
            assert_eq!(r.value, handle);
            if handle != 0 {
                assert_eq!(r.kind, HandleKind::SoftPointer);
            }
        }
    }

    #[test]
    fn test_roundtrip_variable_text() {
        let mut w = make_writer();
        w.write_variable_text("Hello").unwrap();
        let data = w.into_data();
        assert_eq!(reader_over(&data).read_variable_text().unwrap(), "Hello");
    }

    #[test]
    fn test_roundtrip_variable_text_wide() {
        let mut w = BitWriter::new(FileVersion::Ac1021);
        w.write_variable_text("ABC").unwrap();
        let data = w.into_data();
        let mut r = BitReader::new(&data, FileVersion::Ac1021);
        assert_eq!(r.read_variable_text().unwrap(), "ABC");
    }

    #[test]
    fn test_roundtrip_extrusion_and_thickness() {
        let mut w = make_writer();
        w.write_bit_extrusion(Vector3::UNIT_Z).unwrap();
        w.write_bit_thickness(0.0).unwrap();
        w.write_bit_extrusion(Vector3::new(0.0, 1.0, 0.0)).unwrap();
        w.write_bit_thickness(2.5).unwrap();
        let data = w.into_data();

        let mut r = reader_over(&data);
        assert_eq!(r.read_bit_extrusion().unwrap(), Vector3::UNIT_Z);
        assert_eq!(r.read_bit_thickness().unwrap(), 0.0);
        assert_eq!(r.read_bit_extrusion().unwrap(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(r.read_bit_thickness().unwrap(), 2.5);
    }

    #[test]
    fn test_roundtrip_object_type_2010() {
        for value in [1i16, 0x43, 0x1F2, 0x2EF, 0x400] {
            let mut w = BitWriter::new(FileVersion::Ac1024);
            w.write_object_type(value).unwrap();
            let data = w.into_data();
            let mut r = BitReader::new(&data, FileVersion::Ac1024);
            assert_eq!(r.read_object_type().unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_en_color_pre_2004() {
        let mut w = make_writer();
        w.write_en_color(Color::Index(3), Transparency::BY_LAYER)
            .unwrap();
        let data = w.into_data();
        let (color, _, _) = reader_over(&data).read_en_color().unwrap();
        assert_eq!(color, Color::Index(3));
    }

    #[test]
    fn test_roundtrip_cm_color_2004() {
        let mut w = BitWriter::new(FileVersion::Ac1018);
        w.write_cm_color(Color::from_rgb(10, 20, 30)).unwrap();
        let data = w.into_data();
        let mut r = BitReader::new(&data, FileVersion::Ac1018);
        assert_eq!(r.read_cm_color().unwrap(), Color::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_position_in_bits_tracks_writes() {
        let mut w = make_writer();
        w.write_bit(true).unwrap();
        assert_eq!(w.position_in_bits(), 1);
        w.write_2_bits(2).unwrap();
        assert_eq!(w.position_in_bits(), 3);
        w.write_byte(0xFF).unwrap();
        assert_eq!(w.position_in_bits(), 11);
    }

    proptest! {
        #[test]
        fn prop_roundtrip_bit_short(value in any::<i16>(), phase in 0u8..8) {
            let mut w = make_writer();
            for _ in 0..phase {
                w.write_bit(true).unwrap();
            }
            w.write_bit_short(value).unwrap();
            let data = w.into_data();
            let mut r = reader_over(&data);
            for _ in 0..phase {
                r.read_bit().unwrap();
            }
            prop_assert_eq!(r.read_bit_short().unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_bit_long(value in any::<i32>(), phase in 0u8..8) {
            let mut w = make_writer();
            for _ in 0..phase {
                w.write_bit(false).unwrap();
            }
            w.write_bit_long(value).unwrap();
            let data = w.into_data();
            let mut r = reader_over(&data);
            for _ in 0..phase {
                r.read_bit().unwrap();
            }
            prop_assert_eq!(r.read_bit_long().unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_bit_double(value in any::<f64>().prop_filter("finite", |v| v.is_finite()), phase in 0u8..8) {
            let mut w = make_writer();
            for _ in 0..phase {
                w.write_bit(true).unwrap();
            }
            w.write_bit_double(value).unwrap();
            let data = w.into_data();
            let mut r = reader_over(&data);
            for _ in 0..phase {
                r.read_bit().unwrap();
            }
            prop_assert_eq!(r.read_bit_double().unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_modular_char(value in any::<u64>()) {
            let mut w = make_writer();
            w.write_modular_char(value).unwrap();
            let data = w.into_data();
            prop_assert_eq!(reader_over(&data).read_modular_char().unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_signed_modular_char(value in -1_000_000_000i64..1_000_000_000) {
            let mut w = make_writer();
            w.write_signed_modular_char(value).unwrap();
            let data = w.into_data();
            prop_assert_eq!(reader_over(&data).read_signed_modular_char().unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_handle(handle in any::<u64>()) {
            let mut w = make_writer();
            w.write_handle(handle).unwrap();
            let data = w.into_data();
            prop_assert_eq!(reader_over(&data).read_handle_ref().unwrap().value, handle);
        }

        #[test]
        fn prop_roundtrip_dd(def in -1000.0f64..1000.0, value in -1000.0f64..1000.0) {
            let mut w = make_writer();
            w.write_bit_double_with_default(def, value).unwrap();
            let data = w.into_data();
            let got = reader_over(&data).read_bit_double_with_default(def).unwrap();
            prop_assert_eq!(got, value);
        }
    }
}
