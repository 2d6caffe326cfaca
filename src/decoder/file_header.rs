//! Classic file header with the section locator table.

use byteorder::{ByteOrder, LittleEndian};

use crate::decoder::constants::FILE_HEADER_END;
use crate::error::{DecodeError, Result};
use crate::types::FileVersion;

/// One record of the section locator table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionLocator {
    pub id: u8,
    /// Absolute file offset of the section.
    pub seeker: i32,
    /// Section size in bytes.
    pub size: i32,
}

/// The decoded classic file header.
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub version: FileVersion,
    pub maintenance_version: u8,
    /// Absolute offset of the preview image, -1 when absent.
    pub preview_address: i32,
    pub code_page: u16,
    pub records: Vec<SectionLocator>,
}

impl FileHeader {
    /// The locator record at the fixed table index, when present.
    pub fn locator(&self, index: usize) -> Option<&SectionLocator> {
        self.records.get(index)
    }
}

struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&e| e <= self.data.len())
            .ok_or(DecodeError::OutOfBounds {
                position: self.pos as u64,
                context,
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take(1, context)?[0])
    }

    fn u16_le(&mut self, context: &'static str) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2, context)?))
    }

    fn i32_le(&mut self, context: &'static str) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4, context)?))
    }
}

/// Identify the file version from the leading 6-byte tag.
pub fn read_version(data: &[u8]) -> Result<FileVersion> {
    if data.len() < 6 {
        return Err(DecodeError::Structural(
            "buffer too short for a version tag".into(),
        ));
    }
    FileVersion::from_tag(&data[..6])
}

/// Parse the classic file header that follows the version tag.
///
/// Fails with [`DecodeError::UnsupportedVersion`] for files that use the
/// paged container instead of section locators.
pub fn read_file_header(data: &[u8]) -> Result<FileHeader> {
    let version = read_version(data)?;
    if !version.uses_section_locators() {
        return Err(DecodeError::UnsupportedVersion(
            String::from_utf8_lossy(version.tag()).into_owned(),
        ));
    }

    let mut cursor = ByteCursor { data, pos: 6 };

    // Seven padding bytes; the sixth carries the maintenance version.
    let padding = cursor.take(7, "file header padding")?;
    let maintenance_version = padding[5];

    let preview_address = cursor.i32_le("preview address")?;

    // Two undocumented bytes.
    cursor.take(2, "file header")?;

    let code_page = cursor.u16_le("code page")?;

    let record_count = cursor.i32_le("locator record count")?;
    if record_count < 0 || record_count > 16 {
        return Err(DecodeError::Structural(format!(
            "implausible locator record count: {record_count}"
        )));
    }

    let mut records = Vec::with_capacity(record_count as usize);
    for _ in 0..record_count {
        let id = cursor.u8("locator record id")?;
        let seeker = cursor.i32_le("locator record seeker")?;
        let size = cursor.i32_le("locator record size")?;
        records.push(SectionLocator { id, seeker, size });
    }

    // Trailing CRC over the record table; stored but not validated here.
    let _crc = cursor.u16_le("file header crc")?;

    let sentinel = cursor.take(16, "file header sentinel")?;
    if sentinel != FILE_HEADER_END {
        return Err(DecodeError::SentinelMismatch("file header"));
    }

    Ok(FileHeader {
        version,
        maintenance_version,
        preview_address,
        code_page,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_header(version_tag: &str, records: &[(u8, i32, i32)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(version_tag.as_bytes());
        data.extend_from_slice(&[0, 0, 0, 0, 0, 3, 0]); // padding, maintenance 3
        data.extend_from_slice(&(-1i32).to_le_bytes()); // preview
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(&30u16.to_le_bytes()); // code page
        data.extend_from_slice(&(records.len() as i32).to_le_bytes());
        for &(id, seeker, size) in records {
            data.push(id);
            data.extend_from_slice(&seeker.to_le_bytes());
            data.extend_from_slice(&size.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes()); // crc
        data.extend_from_slice(&FILE_HEADER_END);
        data
    }

    #[test]
    fn parses_locator_table() {
        let data = build_header("AC1015", &[(0, 0x60, 0x100), (1, 0x160, 0x80)]);
        let header = read_file_header(&data).unwrap();
        assert_eq!(header.version, FileVersion::Ac1015);
        assert_eq!(header.maintenance_version, 3);
        assert_eq!(header.code_page, 30);
        assert_eq!(header.records.len(), 2);
        assert_eq!(header.records[1].seeker, 0x160);
    }

    #[test]
    fn rejects_paged_container_versions() {
        let data = build_header("AC1018", &[]);
        assert!(matches!(
            read_file_header(&data),
            Err(DecodeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_unknown_tag() {
        let mut data = build_header("AC1015", &[]);
        data[..6].copy_from_slice(b"XXYYZZ");
        assert!(read_file_header(&data).is_err());
    }

    #[test]
    fn rejects_bad_sentinel() {
        let mut data = build_header("AC1015", &[]);
        let n = data.len();
        data[n - 1] ^= 0xFF;
        assert!(matches!(
            read_file_header(&data),
            Err(DecodeError::SentinelMismatch(_))
        ));
    }

    #[test]
    fn truncated_buffer_is_structural() {
        assert!(read_file_header(&[0x41]).is_err());
    }
}
