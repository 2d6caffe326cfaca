//! DWG decoding pipeline.
//!
//! The orchestrator in this module wires the stages together: file header,
//! drawing variables, classes, object map, the per-object decode loop and
//! finally handle resolution. Everything below it is section- or
//! object-local and lives in the submodules.

mod classes;
pub(crate) mod constants;
mod decode_entities;
mod decode_objects;
mod decode_tables;
mod file_header;
mod header_section;
mod link;
mod object_decoder;
mod object_map;
mod object_type;

pub use classes::read_classes_section;
pub use file_header::{read_file_header, read_version, FileHeader, SectionLocator};
pub use header_section::read_header_section;
pub use object_map::{read_object_map, ObjectMap};
pub use object_type::ObjectType;

use encoding_rs::Encoding;
use rayon::prelude::*;

use crate::document::{DocumentGraph, DwgClass, DwgObject, ObjectHeader, ObjectVariant};
use crate::error::{DecodeError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{FileVersion, Handle};

use constants::locator;
use object_decoder::ObjectDecoder;

/// Map entries handed to one worker at a time.
const DECODE_CHUNK: usize = 512;

/// Knobs for [`decode_with_options`].
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Degrade per-object decode failures to `Errored` rows instead of
    /// failing the whole document.
    pub tolerant: bool,
    /// Keep class-coded objects the decoder has no reader for as
    /// `UnknownEntity` / `UnknownObject` rows.
    pub keep_unknown_objects: bool,
    /// Verify the CRC of every object map chunk.
    pub validate_checksums: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            tolerant: true,
            keep_unknown_objects: true,
            validate_checksums: true,
        }
    }
}

/// Decode a DWG byte buffer with default options.
pub fn decode(data: &[u8]) -> Result<DocumentGraph> {
    decode_with_options(data, DecodeOptions::default())
}

/// Decode a DWG byte buffer into a linked [`DocumentGraph`].
///
/// Structural problems (bad file header, unreadable object map) fail the
/// call. Section-level problems in the drawing variables or classes are
/// recorded as notifications and leave that part of the graph at its
/// default. Per-object failures follow `options.tolerant`.
pub fn decode_with_options(data: &[u8], options: DecodeOptions) -> Result<DocumentGraph> {
    let file_header = read_file_header(data)?;
    let version = file_header.version;
    let encoding = encoding_from_code_page(file_header.code_page);

    let mut graph = DocumentGraph::new(version);

    match section_offset(&file_header, locator::HEADER) {
        Ok(offset) => match read_header_section(data, offset, version) {
            Ok(vars) => graph.header = vars,
            Err(e) => graph.notifications.notify(
                NotificationType::Error,
                format!("header variables section failed to decode: {e}"),
            ),
        },
        Err(e) => graph
            .notifications
            .notify(NotificationType::Error, e.to_string()),
    }

    match section_offset(&file_header, locator::CLASSES) {
        Ok(offset) => match read_classes_section(data, offset, version) {
            Ok(classes) => graph.classes = classes,
            Err(e) => graph.notifications.notify(
                NotificationType::Error,
                format!("classes section failed to decode: {e}"),
            ),
        },
        Err(e) => graph
            .notifications
            .notify(NotificationType::Error, e.to_string()),
    }

    // Without the object map there is nothing to decode.
    let map_offset = section_offset(&file_header, locator::HANDLES)?;
    let object_map = read_object_map(data, map_offset, options.validate_checksums)?;

    let entries: Vec<(u64, i64)> = object_map.iter().map(|(h, o)| (*h, *o)).collect();

    let chunks: Vec<Result<DecodedChunk>> = entries
        .par_chunks(DECODE_CHUNK)
        .map(|chunk| decode_chunk(data, version, encoding, &graph.classes, chunk, options))
        .collect();

    for chunk in chunks {
        let chunk = chunk?;
        graph.notifications.extend(chunk.notifications);
        for object in chunk.objects {
            if !options.keep_unknown_objects
                && matches!(
                    object.variant,
                    ObjectVariant::UnknownEntity(_) | ObjectVariant::UnknownObject(_)
                )
            {
                continue;
            }
            let index = graph.objects.len();
            graph.handle_index.insert(object.header.handle, index);
            graph.objects.push(object);
        }
    }

    link::link_graph(&mut graph);

    Ok(graph)
}

struct DecodedChunk {
    objects: Vec<DwgObject>,
    notifications: NotificationCollection,
}

/// Decode one run of object map entries with its own decoder.
///
/// Per-object decode is independent given the map, so runs can proceed in
/// parallel; the caller merges rows back in map order.
fn decode_chunk(
    data: &[u8],
    version: FileVersion,
    encoding: &'static Encoding,
    classes: &[DwgClass],
    entries: &[(u64, i64)],
    options: DecodeOptions,
) -> Result<DecodedChunk> {
    let mut decoder = ObjectDecoder::new(data, version, encoding, classes);
    let mut objects = Vec::with_capacity(entries.len());

    for &(handle, offset) in entries {
        let result = if offset < 0 || offset as usize >= data.len() {
            Err(DecodeError::Structural(format!(
                "object {handle:#x} map offset {offset} is outside the buffer"
            )))
        } else {
            decoder.decode_at(handle, offset as usize)
        };

        match result {
            Ok(object) => objects.push(object),
            Err(e) if options.tolerant => {
                decoder.notifications.notify(
                    NotificationType::Error,
                    format!("object {handle:#x} failed to decode: {e}"),
                );
                let raw = if offset >= 0 {
                    object_decoder::record_bytes(data, version, offset as usize).to_vec()
                } else {
                    Vec::new()
                };
                objects.push(DwgObject {
                    header: ObjectHeader {
                        handle: Handle::new(handle),
                        ..ObjectHeader::default()
                    },
                    variant: ObjectVariant::Errored {
                        raw,
                        message: e.to_string(),
                    },
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(DecodedChunk {
        objects,
        notifications: std::mem::take(&mut decoder.notifications),
    })
}

fn section_offset(header: &FileHeader, index: usize) -> Result<usize> {
    let record = header.locator(index).ok_or_else(|| {
        DecodeError::Structural(format!("section locator {index} missing from directory"))
    })?;
    if record.seeker < 0 {
        return Err(DecodeError::Structural(format!(
            "section locator {index} has negative seeker {}",
            record.seeker
        )));
    }
    Ok(record.seeker as usize)
}

/// Map the file header code page to an encoding for narrow text.
fn encoding_from_code_page(code_page: u16) -> &'static Encoding {
    match code_page {
        0x00 | 0x01 | 0x1E => encoding_rs::WINDOWS_1252,
        0x02 => encoding_rs::WINDOWS_1250,
        0x03 => encoding_rs::WINDOWS_1251,
        0x04 => encoding_rs::WINDOWS_1253,
        0x05 => encoding_rs::WINDOWS_1254,
        0x06 => encoding_rs::WINDOWS_1255,
        0x07 => encoding_rs::WINDOWS_1256,
        0x08 => encoding_rs::WINDOWS_1257,
        0x0A => encoding_rs::WINDOWS_874,
        0x0B => encoding_rs::SHIFT_JIS,
        0x0C => encoding_rs::GBK,
        0x0D => encoding_rs::EUC_KR,
        0x0E => encoding_rs::BIG5,
        _ => encoding_rs::WINDOWS_1252,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = DecodeOptions::default();
        assert!(options.tolerant);
        assert!(options.keep_unknown_objects);
        assert!(options.validate_checksums);
    }

    #[test]
    fn code_page_mapping() {
        assert_eq!(encoding_from_code_page(0x1E).name(), "windows-1252");
        assert_eq!(encoding_from_code_page(0x0B).name(), "Shift_JIS");
        assert_eq!(encoding_from_code_page(0xFF).name(), "windows-1252");
    }

    #[test]
    fn empty_buffer_is_structural() {
        assert!(decode(&[]).is_err());
    }
}
