//! Class definitions section decoder.

use crate::bit::BitReader;
use crate::decoder::constants::{CLASSES_END, CLASSES_START};
use crate::document::DwgClass;
use crate::error::{DecodeError, Result};
use crate::types::FileVersion;

/// Decode the class definitions section found at `offset`.
///
/// Class records repeat until the stored section size is consumed; the
/// class numbers they declare map type codes of 500 and above to
/// application-defined object types.
pub fn read_classes_section(
    data: &[u8],
    offset: usize,
    version: FileVersion,
) -> Result<Vec<DwgClass>> {
    let mut reader = BitReader::at(data, version, offset);

    if reader.read_sentinel()? != CLASSES_START {
        return Err(DecodeError::SentinelMismatch("class definitions"));
    }

    // RL: section size in bytes.
    let size = reader.read_raw_long()? as i64;
    if size < 0 {
        return Err(DecodeError::Structural(
            "negative class section size".into(),
        ));
    }
    let initial_pos = reader.position_in_bits();
    let end_pos = initial_pos + size * 8;

    let mut classes = Vec::new();
    // The payload may carry trailing alignment bits shorter than any record.
    while end_pos - reader.position_in_bits() >= 8 {
        let class_number = reader.read_bit_short()?;
        let proxy_flags = reader.read_bit_short()? as u16;
        let app_name = reader.read_variable_text()?;
        let cpp_name = reader.read_variable_text()?;
        let dxf_name = reader.read_variable_text()?;
        let was_zombie = reader.read_bit()?;
        let item_class_id = reader.read_bit_short()?;

        classes.push(DwgClass {
            class_number,
            proxy_flags,
            app_name,
            cpp_name,
            dxf_name,
            was_zombie,
            item_class_id,
        });
    }

    let _crc = reader.reset_shift()?;
    if reader.read_sentinel()? != CLASSES_END {
        return Err(DecodeError::SentinelMismatch("class definitions end"));
    }

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit::{crc16, BitWriter};

    fn build_section(classes: &[(i16, &str)]) -> Vec<u8> {
        let mut writer = BitWriter::new(FileVersion::Ac1015);
        for &(number, dxf_name) in classes {
            writer.write_bit_short(number).unwrap();
            writer.write_bit_short(0).unwrap(); // proxy flags
            writer.write_variable_text("ObjectDBX Classes").unwrap();
            writer.write_variable_text("AcDbDummy").unwrap();
            writer.write_variable_text(dxf_name).unwrap();
            writer.write_bit(false).unwrap();
            writer.write_bit_short(0x1F3).unwrap();
        }
        let body = writer.into_data();

        let mut data = Vec::new();
        data.extend_from_slice(&CLASSES_START);
        data.extend_from_slice(&(body.len() as i32).to_le_bytes());
        data.extend_from_slice(&body);
        let crc = crc16(&data, 0xC0C1);
        data.extend_from_slice(&crc.to_le_bytes());
        data.extend_from_slice(&CLASSES_END);
        data
    }

    #[test]
    fn reads_class_records() {
        let data = build_section(&[(500, "DICTIONARYVAR"), (501, "RASTERVARIABLES")]);
        let classes = read_classes_section(&data, 0, FileVersion::Ac1015).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].class_number, 500);
        assert_eq!(classes[1].dxf_name, "RASTERVARIABLES");
        assert!(!classes[0].is_entity());
    }

    #[test]
    fn empty_section_yields_no_classes() {
        let data = build_section(&[]);
        let classes = read_classes_section(&data, 0, FileVersion::Ac1015).unwrap();
        assert!(classes.is_empty());
    }

    #[test]
    fn bad_start_sentinel_is_rejected() {
        let mut data = build_section(&[]);
        data[0] ^= 0xFF;
        assert!(matches!(
            read_classes_section(&data, 0, FileVersion::Ac1015),
            Err(DecodeError::SentinelMismatch(_))
        ));
    }
}
