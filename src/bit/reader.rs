//! Bit-level stream reader.
//!
//! All DWG object data is bit-packed: fields start at arbitrary bit
//! positions and most integer and floating point values use variable-cost
//! encodings selected by small discriminants. The reader keeps the byte
//! position plus a 0..7 bit shift and composes every multi-byte read from
//! shifted bytes, so byte-misaligned reads stay exact.
//!
//! Reads past the end of the buffer fail with
//! [`DecodeError::OutOfBounds`]; they never fabricate zero bytes.

use crate::error::{DecodeError, Result};
use crate::types::{Color, FileVersion, Transparency, Vector2, Vector3};

use super::handle_ref::{HandleKind, HandleRef};

use encoding_rs::Encoding;

/// Upper bound for a single variable-length read, guarding against corrupt
/// length fields.
const MAX_BYTE_READ: usize = 16 * 1024 * 1024;

/// Bit-granular cursor over a borrowed byte buffer.
///
/// The buffer is borrowed rather than owned so several readers can walk
/// disjoint objects of the same section concurrently.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    bit_shift: u8,
    last_byte: u8,
    encoding: &'static Encoding,
    version: FileVersion,
}

impl<'a> BitReader<'a> {
    /// Create a new reader over `data`.
    pub fn new(data: &'a [u8], version: FileVersion) -> Self {
        Self {
            data,
            pos: 0,
            bit_shift: 0,
            last_byte: 0,
            encoding: encoding_rs::WINDOWS_1252,
            version,
        }
    }

    /// Create a reader positioned at a byte offset.
    pub fn at(data: &'a [u8], version: FileVersion, position: usize) -> Self {
        let mut reader = Self::new(data, version);
        reader.set_position(position);
        reader
    }

    /// Get the format revision this reader decodes for.
    pub fn version(&self) -> FileVersion {
        self.version
    }

    /// Set the text encoding used for narrow strings.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Get the text encoding.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Total buffer length in bytes.
    pub fn stream_length(&self) -> usize {
        self.data.len()
    }

    // ---------------------------------------------------------------
    // Internal helpers
    // ---------------------------------------------------------------

    fn out_of_bounds(&self, context: &'static str) -> DecodeError {
        DecodeError::OutOfBounds {
            position: self.position_in_bits().max(0) as u64,
            context,
        }
    }

    /// Read a raw byte from the buffer (no bit-shift applied).
    fn read_raw_byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.out_of_bounds("byte"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Load the next raw byte into `last_byte`.
    fn advance_byte(&mut self) -> Result<()> {
        self.last_byte = self.read_raw_byte()?;
        Ok(())
    }

    /// Combine the remainder of `last_byte` with the next raw byte.
    fn apply_shift_to_last_byte(&mut self) -> Result<u8> {
        let value = (self.last_byte as u16) << self.bit_shift;
        self.advance_byte()?;
        Ok((value as u8) | (self.last_byte >> (8 - self.bit_shift)))
    }

    /// Fill `arr[offset..offset + length]` with shifted bytes.
    fn apply_shift_to_arr_at(&mut self, arr: &mut [u8], offset: usize, length: usize) -> Result<()> {
        if self.pos + length > self.data.len() {
            return Err(self.out_of_bounds("byte array"));
        }
        let raw = &self.data[self.pos..self.pos + length];
        self.pos += length;

        if self.bit_shift == 0 {
            arr[offset..offset + length].copy_from_slice(raw);
            return Ok(());
        }

        let shift = 8 - self.bit_shift;
        for (i, &b) in raw.iter().enumerate() {
            let last_byte_value = (self.last_byte as u16) << self.bit_shift;
            self.last_byte = b;
            arr[offset + i] = (last_byte_value as u8) | (self.last_byte >> shift);
        }
        Ok(())
    }

    /// Read a handle's byte payload (stored big-endian, returned as u64).
    fn read_handle_bytes(&mut self, length: usize) -> Result<u64> {
        if length > 8 {
            return Err(DecodeError::InvalidValue(format!(
                "handle byte count {} exceeds maximum of 8",
                length
            )));
        }
        let mut raw = [0u8; 8];
        self.apply_shift_to_arr_at(&mut raw, 0, length)?;

        let mut arr = [0u8; 8];
        for i in 0..length {
            arr[length - 1 - i] = raw[i];
        }
        Ok(u64::from_le_bytes(arr))
    }

    /// Convert a Julian date pair to a floating-point Unix timestamp.
    fn julian_to_timestamp(jdate: i32, milliseconds: i32) -> f64 {
        // Julian day 2440587.5 = 1970-01-01 00:00:00 UTC
        let unix_time = (jdate as f64 - 2440587.5) * 86400.0;
        unix_time + (milliseconds as f64 / 1000.0)
    }

    fn read_short_le(&mut self) -> Result<i16> {
        let b0 = self.read_byte()? as u16;
        let b1 = self.read_byte()? as u16;
        Ok((b0 | (b1 << 8)) as i16)
    }

    fn read_int_le(&mut self) -> Result<i32> {
        let b0 = self.read_byte()? as u32;
        let b1 = self.read_byte()? as u32;
        let b2 = self.read_byte()? as u32;
        let b3 = self.read_byte()? as u32;
        Ok((b0 | (b1 << 8) | (b2 << 16) | (b3 << 24)) as i32)
    }

    fn read_double_le(&mut self) -> Result<f64> {
        let mut arr = [0u8; 8];
        self.apply_shift_to_arr_at(&mut arr, 0, 8)?;
        Ok(f64::from_le_bytes(arr))
    }

    fn read_string(&mut self, length: usize, encoding: &'static Encoding) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        let (decoded, _, _) = encoding.decode(&bytes);
        Ok(decoded.into_owned())
    }

    // ---------------------------------------------------------------
    // Bit codes
    // ---------------------------------------------------------------

    /// Read a single bit (B).
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_shift == 0 {
            self.advance_byte()?;
            let result = (self.last_byte & 128) == 128;
            self.bit_shift = 1;
            return Ok(result);
        }

        let value = ((self.last_byte << self.bit_shift) & 128) == 128;

        self.bit_shift += 1;
        self.bit_shift &= 7;

        Ok(value)
    }

    /// Read a single bit as 0 or 1.
    pub fn read_bit_as_short(&mut self) -> Result<i16> {
        Ok(if self.read_bit()? { 1 } else { 0 })
    }

    /// Read a 2-bit code (BB).
    pub fn read_2_bits(&mut self) -> Result<u8> {
        let value;
        if self.bit_shift == 0 {
            self.advance_byte()?;
            value = self.last_byte >> 6;
            self.bit_shift = 2;
        } else if self.bit_shift == 7 {
            let last_value = (self.last_byte << 1) & 2;
            self.advance_byte()?;
            value = last_value | (self.last_byte >> 7);
            self.bit_shift = 1;
        } else {
            value = (self.last_byte >> (6 - self.bit_shift)) & 3;
            self.bit_shift += 2;
            self.bit_shift &= 7;
        }
        Ok(value)
    }

    /// Read a 3-bit code (3B).
    pub fn read_3_bits(&mut self) -> Result<u8> {
        let b1 = if self.read_bit()? { 1u8 } else { 0u8 };
        let b2 = (b1 << 1) | if self.read_bit()? { 1u8 } else { 0u8 };
        let b3 = (b2 << 1) | if self.read_bit()? { 1u8 } else { 0u8 };
        Ok(b3)
    }

    /// Read a 4-bit nibble (4BITS).
    pub fn read_4_bits(&mut self) -> Result<u8> {
        let hi = self.read_2_bits()?;
        let lo = self.read_2_bits()?;
        Ok((hi << 2) | lo)
    }

    // ---------------------------------------------------------------
    // Raw reads (byte-granular, but shifted when mid-byte)
    // ---------------------------------------------------------------

    /// Read one byte (RC).
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bit_shift == 0 {
            self.advance_byte()?;
            return Ok(self.last_byte);
        }

        let last_values = (self.last_byte as u16) << self.bit_shift;
        self.advance_byte()?;
        Ok((last_values as u8) | (self.last_byte >> (8 - self.bit_shift)))
    }

    /// Read `length` bytes.
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        if length > MAX_BYTE_READ {
            return Err(DecodeError::InvalidValue(format!(
                "requested byte read of {} exceeds sanity limit",
                length
            )));
        }
        let mut arr = vec![0u8; length];
        self.apply_shift_to_arr_at(&mut arr, 0, length)?;
        Ok(arr)
    }

    /// Read a raw little-endian i16 (RS).
    pub fn read_raw_short(&mut self) -> Result<i16> {
        self.read_short_le()
    }

    /// Read a raw little-endian u16.
    pub fn read_raw_ushort(&mut self) -> Result<u16> {
        Ok(self.read_short_le()? as u16)
    }

    /// Read a raw little-endian i32 (RL).
    pub fn read_raw_long(&mut self) -> Result<i32> {
        self.read_int_le()
    }

    /// Read a raw little-endian u64 (RLL).
    pub fn read_raw_ulong(&mut self) -> Result<u64> {
        let lo = self.read_int_le()? as u32 as u64;
        let hi = self.read_int_le()? as u32 as u64;
        Ok(lo | (hi << 32))
    }

    /// Read a raw little-endian f64 (RD).
    pub fn read_raw_double(&mut self) -> Result<f64> {
        self.read_double_le()
    }

    /// Read two raw doubles (2RD).
    pub fn read_2_raw_double(&mut self) -> Result<Vector2> {
        let x = self.read_double_le()?;
        let y = self.read_double_le()?;
        Ok(Vector2::new(x, y))
    }

    /// Read three raw doubles (3RD).
    pub fn read_3_raw_double(&mut self) -> Result<Vector3> {
        let x = self.read_double_le()?;
        let y = self.read_double_le()?;
        let z = self.read_double_le()?;
        Ok(Vector3::new(x, y, z))
    }

    // ---------------------------------------------------------------
    // Bit-coded scalars
    // ---------------------------------------------------------------

    /// Read a bit-coded short (BS).
    pub fn read_bit_short(&mut self) -> Result<i16> {
        match self.read_2_bits()? {
            // 00: full short follows, little-endian
            0 => self.read_short_le(),
            // 01: unsigned char follows
            1 => {
                if self.bit_shift == 0 {
                    self.advance_byte()?;
                    Ok(self.last_byte as i16)
                } else {
                    Ok(self.apply_shift_to_last_byte()? as i16)
                }
            }
            // 10: 0
            2 => Ok(0),
            // 11: 256
            _ => Ok(256),
        }
    }

    /// Read a bit-coded short, interpreting non-zero as true.
    pub fn read_bit_short_as_bool(&mut self) -> Result<bool> {
        Ok(self.read_bit_short()? != 0)
    }

    /// Read a bit-coded long (BL).
    pub fn read_bit_long(&mut self) -> Result<i32> {
        match self.read_2_bits()? {
            // 00: full long follows, little-endian
            0 => self.read_int_le(),
            // 01: unsigned char follows
            1 => {
                if self.bit_shift == 0 {
                    self.advance_byte()?;
                    Ok(self.last_byte as i32)
                } else {
                    Ok(self.apply_shift_to_last_byte()? as i32)
                }
            }
            // 10: 0
            2 => Ok(0),
            // 11: not used
            _ => Err(DecodeError::InvalidValue(
                "bit-coded long with reserved code 3".into(),
            )),
        }
    }

    /// Read a bit-coded long long (BLL): 3-bit byte count, then that many
    /// bytes little-endian.
    pub fn read_bit_long_long(&mut self) -> Result<i64> {
        let mut value: u64 = 0;
        let size = self.read_3_bits()?;

        for i in 0..size {
            let b = self.read_byte()? as u64;
            value += b << ((i as u64) << 3);
        }

        Ok(value as i64)
    }

    /// Read a bit-coded double (BD).
    ///
    /// The 2-bit discriminant selects: 0 = full 8-byte double, 1 = the
    /// constant 1.0, 2 = the constant 0.0, 3 = not-a-number. Code 3 yields
    /// the canonical NaN sentinel so "absent value" never collapses to zero.
    pub fn read_bit_double(&mut self) -> Result<f64> {
        match self.read_2_bits()? {
            0 => self.read_double_le(),
            1 => Ok(1.0),
            2 => Ok(0.0),
            _ => Ok(f64::NAN),
        }
    }

    /// Read a bit-coded double with default (DD).
    pub fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64> {
        let mut arr = def.to_le_bytes();

        match self.read_2_bits()? {
            // 00: use the default unchanged
            0 => Ok(def),
            // 01: 4 bytes patch the low half of the default
            1 => {
                self.apply_shift_to_arr_at(&mut arr, 0, 4)?;
                Ok(f64::from_le_bytes(arr))
            }
            // 10: 6 bytes; first 2 patch bytes [4..6], last 4 patch [0..4]
            2 => {
                self.apply_shift_to_arr_at(&mut arr, 4, 2)?;
                self.apply_shift_to_arr_at(&mut arr, 0, 4)?;
                Ok(f64::from_le_bytes(arr))
            }
            // 11: a full RD follows
            _ => self.read_double_le(),
        }
    }

    /// Read two bit-coded doubles (2BD).
    pub fn read_2_bit_double(&mut self) -> Result<Vector2> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        Ok(Vector2::new(x, y))
    }

    /// Read two bit-coded doubles with defaults (2DD).
    pub fn read_2_bit_double_with_default(&mut self, def: Vector2) -> Result<Vector2> {
        let x = self.read_bit_double_with_default(def.x)?;
        let y = self.read_bit_double_with_default(def.y)?;
        Ok(Vector2::new(x, y))
    }

    /// Read three bit-coded doubles (3BD).
    pub fn read_3_bit_double(&mut self) -> Result<Vector3> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        let z = self.read_bit_double()?;
        Ok(Vector3::new(x, y, z))
    }

    /// Read three bit-coded doubles with defaults (3DD).
    pub fn read_3_bit_double_with_default(&mut self, def: Vector3) -> Result<Vector3> {
        let x = self.read_bit_double_with_default(def.x)?;
        let y = self.read_bit_double_with_default(def.y)?;
        let z = self.read_bit_double_with_default(def.z)?;
        Ok(Vector3::new(x, y, z))
    }

    // ---------------------------------------------------------------
    // Modular (compressed) integers
    // ---------------------------------------------------------------

    /// Read an unsigned modular char (MC): 7 bits per byte, high bit is the
    /// continuation flag, little-endian groups.
    pub fn read_modular_char(&mut self) -> Result<u64> {
        let mut shift = 0;
        let last_byte = self.read_byte()?;

        let mut value = (last_byte & 0b0111_1111) as u64;

        if (last_byte & 0b1000_0000) != 0 {
            loop {
                shift += 7;
                let last = self.read_byte()?;
                value |= ((last & 0b0111_1111) as u64) << shift;

                if (last & 0b1000_0000) == 0 {
                    break;
                }
            }
        }

        Ok(value)
    }

    /// Read a signed modular char: the final byte carries the sign in
    /// bit 6 and only 6 value bits.
    pub fn read_signed_modular_char(&mut self) -> Result<i64> {
        let last_byte = self.read_byte()?;

        if (last_byte & 0b1000_0000) == 0 {
            let mut value = (last_byte & 0b0011_1111) as i64;
            if (last_byte & 0b0100_0000) != 0 {
                value = -value;
            }
            return Ok(value);
        }

        let mut total_shift = 0i32;
        let mut sum = (last_byte & 0b0111_1111) as i64;

        loop {
            total_shift += 7;
            let curr_byte = self.read_byte()?;

            if (curr_byte & 0b1000_0000) != 0 {
                sum |= ((curr_byte & 0b0111_1111) as i64) << total_shift;
            } else {
                let mut value = sum | (((curr_byte & 0b0011_1111) as i64) << total_shift);
                if (curr_byte & 0b0100_0000) != 0 {
                    value = -value;
                }
                return Ok(value);
            }
        }
    }

    /// Read a modular short (MS): 15 bits per little-endian byte pair, the
    /// high bit of the second byte is the continuation flag.
    pub fn read_modular_short(&mut self) -> Result<i32> {
        let mut shift = 0b1111i32;

        let b1 = self.read_byte()?;
        let b2 = self.read_byte()?;

        let mut flag = (b2 & 0b1000_0000) == 0;
        let mut value = (b1 as i32) | (((b2 & 0b0111_1111) as i32) << 8);

        while !flag {
            let b1 = self.read_byte()?;
            let b2 = self.read_byte()?;

            flag = (b2 & 0b1000_0000) == 0;

            value |= (b1 as i32) << shift;
            shift += 8;
            value |= ((b2 & 0b0111_1111) as i32) << shift;
            shift += 7;
        }

        Ok(value)
    }

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// Read a raw handle reference (H).
    pub fn read_handle_ref(&mut self) -> Result<HandleRef> {
        // |KIND (4 bits)|COUNT (4 bits)|VALUE bytes|
        let form = self.read_byte()?;

        let kind = HandleKind::from_code(form >> 4)?;
        let counter = form & 0b0000_1111;

        let value = match kind {
            HandleKind::PlusOne | HandleKind::MinusOne => 0,
            _ => self.read_handle_bytes(counter as usize)?,
        };

        Ok(HandleRef::new(kind, counter, value))
    }

    /// Read a handle reference and resolve it against the referencing
    /// object's handle.
    pub fn read_handle(&mut self, referrer: u64) -> Result<u64> {
        Ok(self.read_handle_ref()?.resolve(referrer))
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// Read a variable text field (TV / TU).
    ///
    /// Pre-2007 files store codepage bytes; 2007+ files store UTF-16LE
    /// code units. The length prefix is a bit-coded short in both cases.
    pub fn read_variable_text(&mut self) -> Result<String> {
        if self.version.r2007_plus() {
            let text_length = self.read_bit_short()?;
            if text_length == 0 {
                return Ok(String::new());
            }
            // Each code unit is 2 bytes.
            let byte_length = (text_length as usize) << 1;
            let s = self.read_string(byte_length, encoding_rs::UTF_16LE)?;
            Ok(s.replace('\0', ""))
        } else {
            let length = self.read_bit_short()?;
            if length <= 0 {
                return Ok(String::new());
            }
            let s = self.read_string(length as usize, self.encoding)?;
            Ok(s.replace('\0', ""))
        }
    }

    // ---------------------------------------------------------------
    // Sentinels
    // ---------------------------------------------------------------

    /// Read a 16-byte section sentinel.
    pub fn read_sentinel(&mut self) -> Result<[u8; 16]> {
        let mut sentinel = [0u8; 16];
        self.apply_shift_to_arr_at(&mut sentinel, 0, 16)?;
        Ok(sentinel)
    }

    // ---------------------------------------------------------------
    // Colors
    // ---------------------------------------------------------------

    /// Read a CmColor value (CMC).
    pub fn read_cm_color(&mut self) -> Result<Color> {
        if self.version.r2004_plus() {
            // BS: color index (always 0 in this encoding)
            let _color_index = self.read_bit_short()?;
            // BL: RGB value
            let rgb = self.read_bit_long()? as u32;
            let arr = rgb.to_le_bytes();

            let color = if rgb == 0xC000_0000 {
                Color::ByLayer
            } else if (rgb & 0x0100_0000) != 0 {
                Color::Index(arr[0])
            } else {
                Color::from_rgb(arr[2], arr[1], arr[0])
            };

            // RC: flags for trailing name strings
            let id = self.read_byte()?;
            if (id & 1) == 1 {
                let _ = self.read_variable_text()?;
            }
            if (id & 2) == 2 {
                let _ = self.read_variable_text()?;
            }

            Ok(color)
        } else {
            let color_index = self.read_bit_short()?;
            Ok(Color::from_index(color_index))
        }
    }

    /// Read an entity color value (ENC).
    pub fn read_en_color(&mut self) -> Result<(Color, Transparency, bool)> {
        if self.version.r2004_plus() {
            let size = self.read_bit_short()?;

            if size == 0 {
                return Ok((Color::ByBlock, Transparency::OPAQUE, false));
            }

            let flags = (size as u16) & 0xFF00;
            let color;
            let mut transparency = Transparency::BY_LAYER;
            let mut is_book_color = false;

            if (flags & 0x4000) > 0 {
                // AcDbColor reference follows in the handle stream
                color = Color::ByBlock;
                is_book_color = true;
            } else if (flags & 0x8000) > 0 {
                let rgb = self.read_bit_long()? as u32;
                let arr = rgb.to_le_bytes();
                color = Color::from_rgb(arr[2], arr[1], arr[0]);
            } else {
                color = Color::from_index((size & 0x0FFF) as i16);
            }

            if (flags & 0x2000) > 0 {
                let value = self.read_bit_long()? as u32;
                transparency = Transparency::from_alpha_value(value);
            }

            Ok((color, transparency, is_book_color))
        } else {
            let color_number = self.read_bit_short()?;
            Ok((
                Color::from_index(color_number),
                Transparency::BY_LAYER,
                false,
            ))
        }
    }

    // ---------------------------------------------------------------
    // Special types
    // ---------------------------------------------------------------

    /// Read a raw object type code (OT).
    pub fn read_object_type(&mut self) -> Result<i16> {
        if self.version.r2010_plus() {
            // 2010+: 2-bit pair selects the payload width
            match self.read_2_bits()? {
                0 => Ok(self.read_byte()? as i16),
                1 => Ok(0x1F0 + self.read_byte()? as i16),
                _ => self.read_raw_short(),
            }
        } else {
            self.read_bit_short()
        }
    }

    /// Read a bit-coded extrusion vector (BE).
    pub fn read_bit_extrusion(&mut self) -> Result<Vector3> {
        if self.version.r2000_plus() {
            // One flag bit; set means the default normal (0,0,1).
            if self.read_bit()? {
                Ok(Vector3::UNIT_Z)
            } else {
                self.read_3_bit_double()
            }
        } else {
            self.read_3_bit_double()
        }
    }

    /// Read a bit-coded thickness (BT).
    pub fn read_bit_thickness(&mut self) -> Result<f64> {
        if self.version.r2000_plus() {
            // One flag bit; set means zero thickness.
            if self.read_bit()? {
                Ok(0.0)
            } else {
                self.read_bit_double()
            }
        } else {
            self.read_bit_double()
        }
    }

    // ---------------------------------------------------------------
    // Date / time
    // ---------------------------------------------------------------

    /// Read a bit-coded Julian date (two BLs) as a Unix timestamp.
    pub fn read_date_time(&mut self) -> Result<f64> {
        let jdate = self.read_bit_long()?;
        let ms = self.read_bit_long()?;
        Ok(Self::julian_to_timestamp(jdate, ms))
    }

    /// Read a time span (two BLs) as seconds.
    pub fn read_time_span(&mut self) -> Result<f64> {
        let hours = self.read_bit_long()? as f64;
        let milliseconds = self.read_bit_long()? as f64;
        Ok(hours * 3600.0 + milliseconds / 1000.0)
    }

    // ---------------------------------------------------------------
    // Position
    // ---------------------------------------------------------------

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Seek to a byte position and clear the bit shift.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
        self.bit_shift = 0;
    }

    /// Current absolute position in bits.
    pub fn position_in_bits(&self) -> i64 {
        let bit_position = self.pos as i64 * 8;
        if self.bit_shift > 0 {
            bit_position + self.bit_shift as i64 - 8
        } else {
            bit_position
        }
    }

    /// Seek to an absolute bit position.
    pub fn set_position_in_bits(&mut self, position: i64) -> Result<()> {
        self.set_position((position >> 3) as usize);
        self.bit_shift = (position & 7) as u8;

        if self.bit_shift > 0 {
            self.advance_byte()?;
        }
        Ok(())
    }

    /// Align to the next byte boundary and read a raw little-endian u16.
    ///
    /// Sections store their trailing CRC byte-aligned, after bit-packed
    /// payloads of arbitrary bit length.
    pub fn reset_shift(&mut self) -> Result<u16> {
        if self.bit_shift > 0 {
            self.bit_shift = 0;
        }

        self.advance_byte()?;
        let low = self.last_byte as u16;
        self.advance_byte()?;
        let high = self.last_byte as u16;

        Ok(low | (high << 8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_reader(data: &[u8]) -> BitReader<'_> {
        BitReader::new(data, FileVersion::Ac1015)
    }

    /// Pack a 2-bit prefix code followed by value bytes into a bitstream.
    pub(crate) fn pack_2bit(code: u8, value: &[u8]) -> Vec<u8> {
        let mut bits: Vec<bool> = Vec::new();
        bits.push((code >> 1) & 1 == 1);
        bits.push(code & 1 == 1);
        for &b in value {
            for j in (0..8).rev() {
                bits.push((b >> j) & 1 == 1);
            }
        }
        bits_to_bytes(&bits)
    }

    /// Pack a 3-bit prefix code followed by value bytes into a bitstream.
    fn pack_3bit(code: u8, value: &[u8]) -> Vec<u8> {
        let mut bits: Vec<bool> = Vec::new();
        bits.push((code >> 2) & 1 == 1);
        bits.push((code >> 1) & 1 == 1);
        bits.push(code & 1 == 1);
        for &b in value {
            for j in (0..8).rev() {
                bits.push((b >> j) & 1 == 1);
            }
        }
        bits_to_bytes(&bits)
    }

    fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
        let mut result = Vec::new();
        for chunk in bits.chunks(8) {
            let mut byte = 0u8;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit {
                    byte |= 1 << (7 - i);
                }
            }
            result.push(byte);
        }
        result
    }

    #[test]
    fn test_read_bit() {
        // 0b10110000
        let mut reader = make_reader(&[0xB0]);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
    }

    #[test]
    fn test_read_bit_out_of_bounds() {
        let mut reader = make_reader(&[]);
        assert!(matches!(
            reader.read_bit(),
            Err(DecodeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_read_2_bits() {
        // 0b11010000 → 11, then 01
        let mut reader = make_reader(&[0xD0]);
        assert_eq!(reader.read_2_bits().unwrap(), 3);
        assert_eq!(reader.read_2_bits().unwrap(), 1);
    }

    #[test]
    fn test_read_2_bits_across_byte_boundary() {
        // Seven single bits, then a 2-bit code spanning the byte edge.
        // 0b1111111_0 1_1000000: last bit of byte 0 is 0, first of byte 1 is 1.
        let mut reader = make_reader(&[0xFE, 0xC0]);
        for _ in 0..7 {
            assert!(reader.read_bit().unwrap());
        }
        assert_eq!(reader.read_2_bits().unwrap(), 0b01);
    }

    #[test]
    fn test_read_4_bits() {
        // 0b1011_0000 → nibble 0b1011 = 11
        let mut reader = make_reader(&[0xB0]);
        assert_eq!(reader.read_4_bits().unwrap(), 0b1011);
    }

    #[test]
    fn test_read_bit_short_codes() {
        // code 10 = zero
        assert_eq!(make_reader(&[0x80]).read_bit_short().unwrap(), 0);
        // code 11 = 256
        assert_eq!(make_reader(&[0xC0]).read_bit_short().unwrap(), 256);
        // code 01 + byte
        let data = pack_2bit(0b01, &[0x42]);
        assert_eq!(make_reader(&data).read_bit_short().unwrap(), 0x42);
        // code 00 + LE short
        let data = pack_2bit(0b00, &[0x34, 0x12]);
        assert_eq!(make_reader(&data).read_bit_short().unwrap(), 0x1234);
    }

    #[test]
    fn test_read_bit_long_codes() {
        assert_eq!(make_reader(&[0x80]).read_bit_long().unwrap(), 0);
        let data = pack_2bit(0b01, &[0xFF]);
        assert_eq!(make_reader(&data).read_bit_long().unwrap(), 255);
        let data = pack_2bit(0b00, &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(make_reader(&data).read_bit_long().unwrap(), 0x12345678);
        // code 11 is reserved
        assert!(make_reader(&[0xC0]).read_bit_long().is_err());
    }

    #[test]
    fn test_read_bit_long_long() {
        // 3-bit size 001, one byte 0x42
        let data = pack_3bit(0b001, &[0x42]);
        assert_eq!(make_reader(&data).read_bit_long_long().unwrap(), 0x42);
        // size 010, two bytes LE
        let data = pack_3bit(0b010, &[0x34, 0x12]);
        assert_eq!(make_reader(&data).read_bit_long_long().unwrap(), 0x1234);
    }

    #[test]
    fn test_read_bit_double_constants() {
        assert_eq!(make_reader(&[0x80]).read_bit_double().unwrap(), 0.0);
        assert_eq!(make_reader(&[0x40]).read_bit_double().unwrap(), 1.0);
        // code 11 = not-a-number sentinel
        assert!(make_reader(&[0xC0]).read_bit_double().unwrap().is_nan());
    }

    #[test]
    fn test_read_bit_double_full() {
        let data = pack_2bit(0b00, &3.14f64.to_le_bytes());
        let result = make_reader(&data).read_bit_double().unwrap();
        assert_eq!(result, 3.14);
    }

    #[test]
    fn test_read_bit_double_with_default() {
        // code 00 = keep the default
        let mut reader = make_reader(&[0x00]);
        assert_eq!(reader.read_bit_double_with_default(42.0).unwrap(), 42.0);
    }

    #[test]
    fn test_read_byte_no_shift() {
        assert_eq!(make_reader(&[0xAB]).read_byte().unwrap(), 0xAB);
    }

    #[test]
    fn test_read_bytes_with_shift() {
        // Read one bit (sets shift=1), then a byte spanning two raw bytes.
        let mut reader = make_reader(&[0xFF, 0x80]);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_read_raw_scalars() {
        assert_eq!(make_reader(&[0x34, 0x12]).read_raw_short().unwrap(), 0x1234);
        assert_eq!(
            make_reader(&[0x78, 0x56, 0x34, 0x12]).read_raw_long().unwrap(),
            0x12345678
        );
        let mut data = vec![0u8; 8];
        data[0] = 0x01;
        data[7] = 0x80;
        assert_eq!(
            make_reader(&data).read_raw_ulong().unwrap(),
            0x8000_0000_0000_0001
        );
    }

    #[test]
    fn test_read_modular_char() {
        assert_eq!(make_reader(&[0x3F]).read_modular_char().unwrap(), 63);
        // 0x81 0x01 → 1 + (1 << 7) = 129
        assert_eq!(make_reader(&[0x81, 0x01]).read_modular_char().unwrap(), 129);
    }

    #[test]
    fn test_read_signed_modular_char() {
        assert_eq!(make_reader(&[0x05]).read_signed_modular_char().unwrap(), 5);
        // 0x45 → value 5 with sign bit
        assert_eq!(make_reader(&[0x45]).read_signed_modular_char().unwrap(), -5);
        // Multi-byte: 0x85 0x4B → (5 | (0x0B << 7)) negative = -1413
        assert_eq!(
            make_reader(&[0x85, 0x4B]).read_signed_modular_char().unwrap(),
            -1413
        );
    }

    #[test]
    fn test_read_modular_short() {
        assert_eq!(make_reader(&[0x10, 0x00]).read_modular_short().unwrap(), 16);
        // Continuation pair: (0x00, 0x80) then (0x01, 0x00)
        // value = 0 | (1 << 15) = 32768
        assert_eq!(
            make_reader(&[0x00, 0x80, 0x01, 0x00])
                .read_modular_short()
                .unwrap(),
            32768
        );
    }

    #[test]
    fn test_handle_ref_absolute() {
        // form 0x41: kind=4 (soft pointer), counter=1, value byte 0x1A
        let mut reader = make_reader(&[0x41, 0x1A]);
        let r = reader.read_handle_ref().unwrap();
        assert_eq!(r.kind, HandleKind::SoftPointer);
        assert_eq!(r.value, 0x1A);
        assert_eq!(r.resolve(0x50), 0x1A);
    }

    #[test]
    fn test_handle_ref_multi_byte_big_endian() {
        // Two value bytes 0x01 0x02 → 0x0102
        let mut reader = make_reader(&[0x52, 0x01, 0x02]);
        let r = reader.read_handle_ref().unwrap();
        assert_eq!(r.kind, HandleKind::HardPointer);
        assert_eq!(r.value, 0x0102);
    }

    #[test]
    fn test_handle_ref_relative() {
        assert_eq!(make_reader(&[0x60]).read_handle(0x100).unwrap(), 0x101);
        assert_eq!(make_reader(&[0x80]).read_handle(0x100).unwrap(), 0xFF);
        assert_eq!(make_reader(&[0xA1, 0x05]).read_handle(0x100).unwrap(), 0x105);
        assert_eq!(make_reader(&[0xC1, 0x05]).read_handle(0x100).unwrap(), 0xFB);
    }

    #[test]
    fn test_handle_ref_invalid_code() {
        // kind 7 is undefined
        assert!(matches!(
            make_reader(&[0x70]).read_handle_ref(),
            Err(DecodeError::InvalidHandleCode(7))
        ));
    }

    #[test]
    fn test_read_variable_text_empty() {
        // BS = 0 (code 10)
        let mut reader = make_reader(&[0x80]);
        assert!(reader.read_variable_text().unwrap().is_empty());
    }

    #[test]
    fn test_read_variable_text_ascii() {
        // BS = 2 (code 01 + byte 2), then "AB"
        let mut data = Vec::new();
        let mut bits: Vec<bool> = vec![false, true];
        for b in [2u8, b'A', b'B'] {
            for j in (0..8).rev() {
                bits.push((b >> j) & 1 == 1);
            }
        }
        data.extend(bits_to_bytes(&bits));
        let mut reader = make_reader(&data);
        assert_eq!(reader.read_variable_text().unwrap(), "AB");
    }

    #[test]
    fn test_read_sentinel() {
        let sentinel_data: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let mut reader = make_reader(&sentinel_data);
        assert_eq!(reader.read_sentinel().unwrap(), sentinel_data);
    }

    #[test]
    fn test_read_en_color_pre_2004() {
        let data = pack_2bit(0b01, &[0x07]);
        let mut reader = make_reader(&data);
        let (color, transparency, is_book) = reader.read_en_color().unwrap();
        assert_eq!(color, Color::Index(7));
        assert_eq!(transparency, Transparency::BY_LAYER);
        assert!(!is_book);
    }

    #[test]
    fn test_read_en_color_2004_indexed() {
        let data = pack_2bit(0b01, &[0x07]);
        let mut reader = BitReader::new(&data, FileVersion::Ac1018);
        let (color, _, is_book) = reader.read_en_color().unwrap();
        assert_eq!(color, Color::Index(7));
        assert!(!is_book);
    }

    #[test]
    fn test_read_object_type_pre_2010() {
        let data = pack_2bit(0b01, &[0x12]);
        let mut reader = make_reader(&data);
        assert_eq!(reader.read_object_type().unwrap(), 0x12);
    }

    #[test]
    fn test_read_object_type_2010() {
        let data = pack_2bit(0b01, &[0x02]);
        let mut reader = BitReader::new(&data, FileVersion::Ac1024);
        assert_eq!(reader.read_object_type().unwrap(), 0x1F2);
    }

    #[test]
    fn test_read_bit_extrusion_flag_set() {
        let mut reader = make_reader(&[0x80]);
        assert_eq!(reader.read_bit_extrusion().unwrap(), Vector3::UNIT_Z);
    }

    #[test]
    fn test_read_bit_extrusion_flag_clear() {
        // bit 0, then 3 × BD code 10 (0.0): 0b0101010_0
        let mut reader = make_reader(&[0x54, 0x00]);
        assert_eq!(
            reader.read_bit_extrusion().unwrap(),
            Vector3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_read_bit_extrusion_pre_2000() {
        // Pre-R2000 always reads 3BD: 10 10 10
        let mut reader = BitReader::new(&[0xA8], FileVersion::Ac1014);
        assert_eq!(
            reader.read_bit_extrusion().unwrap(),
            Vector3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_read_bit_thickness_flag_set() {
        let mut reader = make_reader(&[0x80]);
        assert_eq!(reader.read_bit_thickness().unwrap(), 0.0);
    }

    #[test]
    fn test_position_in_bits() {
        let mut reader = make_reader(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.position_in_bits(), 0);

        reader.read_bit().unwrap();
        assert_eq!(reader.position_in_bits(), 1);

        reader.read_2_bits().unwrap();
        assert_eq!(reader.position_in_bits(), 3);

        reader.read_byte().unwrap();
        assert_eq!(reader.position_in_bits(), 11);
    }

    #[test]
    fn test_set_position_in_bits() {
        let mut reader = make_reader(&[0x00, 0x00, 0xFF, 0xFF]);
        reader.set_position_in_bits(16).unwrap();
        assert_eq!(reader.read_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_cursor_advances_by_exact_widths() {
        // B + BB + 3B + 4BITS + RC = 1+2+3+4+8 = 18 bits
        let mut reader = make_reader(&[0xAA, 0x55, 0xAA]);
        reader.read_bit().unwrap();
        reader.read_2_bits().unwrap();
        reader.read_3_bits().unwrap();
        reader.read_4_bits().unwrap();
        reader.read_byte().unwrap();
        assert_eq!(reader.position_in_bits(), 18);
    }

    #[test]
    fn test_reset_shift_reads_aligned_short() {
        // Bit-packed junk in byte 0, CRC 0x1234 stored LE at bytes 1..3.
        let mut reader = make_reader(&[0xFF, 0x34, 0x12]);
        reader.read_bit().unwrap();
        assert_eq!(reader.reset_shift().unwrap(), 0x1234);
    }
}
