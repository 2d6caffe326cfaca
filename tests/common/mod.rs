//! Synthetic AC1015 document builder shared by the integration tests.
//!
//! Builds byte-exact files with the crate's own `BitWriter`: classic file
//! header with a three-entry locator table, drawing variables, an empty
//! classes section, an object area and the object map.

use dwg_decode::bit::{crc16, BitWriter, HandleKind};
use dwg_decode::{FileVersion, Vector3};

pub const VERSION: FileVersion = FileVersion::Ac1015;

const HEADER_START: [u8; 16] = [
    0xCF, 0x7B, 0x1F, 0x23, 0xFD, 0xDE, 0x38, 0xA9, 0x5F, 0x7C, 0x68, 0xB8, 0x4E, 0x6D, 0x33,
    0x5F,
];
const HEADER_END: [u8; 16] = [
    0x30, 0x84, 0xE0, 0xDC, 0x02, 0x21, 0xC7, 0x56, 0xA0, 0x83, 0x97, 0x47, 0xB1, 0x92, 0xCC,
    0xA0,
];
const CLASSES_START: [u8; 16] = [
    0x8D, 0xA1, 0xC4, 0xB8, 0xC4, 0xA9, 0xF8, 0xC5, 0xC0, 0xDC, 0xF4, 0x5F, 0xE7, 0xCF, 0xB6,
    0x8A,
];
const CLASSES_END: [u8; 16] = [
    0x72, 0x5E, 0x3B, 0x47, 0x3B, 0x56, 0x07, 0x3A, 0x3F, 0x23, 0x0B, 0xA0, 0x18, 0x30, 0x49,
    0x75,
];
const FILE_HEADER_END: [u8; 16] = [
    0x95, 0xA0, 0x4E, 0x28, 0x99, 0x82, 0x1A, 0xE5, 0x5E, 0x41, 0xE0, 0x5F, 0x9D, 0x3A, 0x4D,
    0x00,
];

/// One stored object: its map handle and record bytes (MS size included).
pub struct ObjectRecord {
    pub handle: u64,
    pub bytes: Vec<u8>,
}

/// Assemble an object record: MS byte size, OT type code, RL bit size,
/// object data, then the handle run.
///
/// The closures run twice; the first pass measures the bit size the second
/// pass stores.
pub fn object_record(
    type_code: i16,
    body: impl Fn(&mut BitWriter),
    handles: impl Fn(&mut BitWriter),
) -> Vec<u8> {
    let mut probe = BitWriter::new(VERSION);
    probe.write_object_type(type_code).unwrap();
    let type_bits = probe.position_in_bits();

    let mut probe = BitWriter::new(VERSION);
    body(&mut probe);
    let body_bits = probe.position_in_bits();

    // Bit size counts from after the MS size to the start of the handle run.
    let bit_size = type_bits + 32 + body_bits;

    let mut w = BitWriter::new(VERSION);
    w.write_object_type(type_code).unwrap();
    w.write_raw_long(bit_size as i32).unwrap();
    body(&mut w);
    handles(&mut w);
    let data = w.into_data();

    let mut ms = BitWriter::new(VERSION);
    ms.write_modular_short(data.len() as u32).unwrap();
    let mut record = ms.into_data();
    record.extend_from_slice(&data);
    record
}

/// The common entity run: model-space entity, no EED, no reactors, no
/// sibling links, ByLayer color and linetype.
pub fn entity_common(w: &mut BitWriter, handle: u64) {
    w.write_handle(handle).unwrap();
    w.write_bit_short(0).unwrap(); // no extended data
    w.write_bit(false).unwrap(); // no proxy graphic
    w.write_2_bits(2).unwrap(); // model space, no owner handle
    w.write_bit_long(0).unwrap(); // reactors
    w.write_bit(true).unwrap(); // no prev/next links
    w.write_bit_short(256).unwrap(); // color ByLayer
    w.write_bit_double(1.0).unwrap(); // linetype scale
    w.write_2_bits(0).unwrap(); // linetype ByLayer
    w.write_2_bits(0).unwrap(); // plotstyle ByLayer
    w.write_bit_short(0).unwrap(); // visible
    w.write_byte(0x1D).unwrap(); // lineweight ByLayer
}

/// Handle run prefix matching [`entity_common`]: xdictionary then layer.
pub fn entity_common_handles(w: &mut BitWriter) {
    w.write_handle(0).unwrap(); // xdictionary
    w.write_handle(0).unwrap(); // layer
}

/// The common non-entity run: no EED, no reactors.
pub fn object_common(w: &mut BitWriter, handle: u64) {
    w.write_handle(handle).unwrap();
    w.write_bit_short(0).unwrap(); // no extended data
    w.write_bit_long(0).unwrap(); // reactors
}

/// Handle run prefix matching [`object_common`]: owner then xdictionary.
pub fn object_common_handles(w: &mut BitWriter, owner: u64) {
    w.write_handle_ref(HandleKind::HardOwnership, owner).unwrap();
    w.write_handle(0).unwrap(); // xdictionary
}

pub fn circle_record(handle: u64, center: Vector3, radius: f64) -> ObjectRecord {
    let bytes = object_record(
        0x12,
        move |w| {
            entity_common(w, handle);
            w.write_3_bit_double(center).unwrap();
            w.write_bit_double(radius).unwrap();
            w.write_bit_thickness(0.0).unwrap();
            w.write_bit_extrusion(Vector3::UNIT_Z).unwrap();
        },
        entity_common_handles,
    );
    ObjectRecord { handle, bytes }
}

/// An INSERT with unit scale and no attributes, pointing at `block_header`.
pub fn insert_record(handle: u64, block_header: u64) -> ObjectRecord {
    let bytes = object_record(
        0x07,
        move |w| {
            entity_common(w, handle);
            w.write_3_bit_double(Vector3::new(0.0, 0.0, 0.0)).unwrap();
            w.write_2_bits(3).unwrap(); // scale flags: x = 1.0, y = x
            w.write_bit_double_with_default(1.0, 1.0).unwrap(); // z
            w.write_bit_double(0.0).unwrap(); // rotation
            w.write_bit_extrusion(Vector3::UNIT_Z).unwrap();
            w.write_bit(false).unwrap(); // no attributes
        },
        move |w| {
            entity_common_handles(w);
            w.write_handle_ref(HandleKind::HardPointer, block_header)
                .unwrap();
        },
    );
    ObjectRecord { handle, bytes }
}

/// A plain (non-xref) BLOCK_HEADER with the given name and no entities.
pub fn block_header_record(handle: u64, name: &str) -> ObjectRecord {
    let name = name.to_string();
    let bytes = object_record(
        0x31,
        move |w| {
            object_common(w, handle);
            w.write_variable_text(&name).unwrap();
            w.write_bit(false).unwrap(); // not referenced by an xref
            w.write_bit_short(0).unwrap(); // xref index
            w.write_bit(false).unwrap(); // not xref dependent
            w.write_bit(false).unwrap(); // anonymous
            w.write_bit(false).unwrap(); // has attribute definitions
            w.write_bit(false).unwrap(); // is xref
            w.write_bit(false).unwrap(); // is xref overlay
            w.write_bit(false).unwrap(); // xref loaded
            w.write_3_bit_double(Vector3::new(0.0, 0.0, 0.0)).unwrap();
            w.write_variable_text("").unwrap(); // xref path
            w.write_byte(0).unwrap(); // insert count terminator
            w.write_variable_text("").unwrap(); // description
            w.write_bit_long(0).unwrap(); // no preview
        },
        |w| {
            object_common_handles(w, 0);
            w.write_handle(0).unwrap(); // xref record
            w.write_handle(0).unwrap(); // block entity
            w.write_handle(0).unwrap(); // first entity
            w.write_handle(0).unwrap(); // last entity
            w.write_handle(0).unwrap(); // end block entity
            w.write_handle(0).unwrap(); // layout
        },
    );
    ObjectRecord { handle, bytes }
}

/// An object with a class-coded type the decoder has no reader for. With
/// an empty classes section it decodes as an unknown object.
pub fn unclassed_record(handle: u64) -> ObjectRecord {
    let bytes = object_record(
        0x1F5,
        move |w| object_common(w, handle),
        |w| object_common_handles(w, 0),
    );
    ObjectRecord { handle, bytes }
}

/// A record whose declared bit size overruns the buffer; decoding it must
/// fail without disturbing its neighbours.
pub fn truncated_record(handle: u64) -> ObjectRecord {
    let mut ms = BitWriter::new(VERSION);
    ms.write_modular_short(64).unwrap();
    let mut bytes = ms.into_data();
    // OT for CIRCLE, then a bit size pointing far past the end of any
    // plausible file: the handle run read falls off the buffer.
    let mut w = BitWriter::new(VERSION);
    w.write_object_type(0x12).unwrap();
    w.write_raw_long(0x7FFF_FFF0).unwrap();
    bytes.extend_from_slice(&w.into_data());
    ObjectRecord { handle, bytes }
}

fn drawing_variables_body() -> Vec<u8> {
    let mut w = BitWriter::new(VERSION);
    for _ in 0..4 {
        w.write_bit_double(0.0).unwrap();
    }
    for _ in 0..4 {
        w.write_variable_text("").unwrap();
    }
    w.write_bit_long(0).unwrap();
    w.write_bit_long(0).unwrap();
    w.write_handle(0).unwrap(); // current viewport entity header

    // Twenty boolean variables.
    for _ in 0..20 {
        w.write_bit(false).unwrap();
    }
    w.write_bit_short(1).unwrap(); // PROXYGRAPHICS
    w.write_bit_short(0).unwrap(); // TREEDEPTH
    w.write_bit_short(2).unwrap(); // LUNITS
    w.write_bit_short(4).unwrap(); // LUPREC
    w.write_bit_short(0).unwrap(); // AUNITS
    w.write_bit_short(0).unwrap(); // AUPREC
    w.write_bit_short(0).unwrap(); // ATTMODE
    w.write_bit_short(0).unwrap(); // PDMODE
    for _ in 0..5 {
        w.write_bit_short(0).unwrap(); // USERI1..USERI5
    }
    for _ in 0..11 {
        w.write_bit_short(0).unwrap(); // SPLINESEGS..MAXACTVP
    }
    w.write_bit_short(4).unwrap(); // ISOLINES
    w.write_bit_short(0).unwrap(); // CMLJUST
    w.write_bit_short(50).unwrap(); // TEXTQLTY
    w.write_bit_double(1.0).unwrap(); // LTSCALE
    w.write_bit_double(2.5).unwrap(); // TEXTSIZE
    w.write_bit_double(0.0).unwrap(); // TRACEWID
    w.write_bit_double(0.0).unwrap(); // SKETCHINC
    w.write_bit_double(0.0).unwrap(); // FILLETRAD
    w.write_bit_double(0.0).unwrap(); // THICKNESS
    w.write_bit_double(0.0).unwrap(); // ANGBASE
    w.into_data()
}

fn drawing_variables_section() -> Vec<u8> {
    let body = drawing_variables_body();
    let mut data = Vec::new();
    data.extend_from_slice(&HEADER_START);
    data.extend_from_slice(&(body.len() as i32).to_le_bytes());
    data.extend_from_slice(&body);
    let crc = crc16(&data, 0xC0C1);
    data.extend_from_slice(&crc.to_le_bytes());
    data.extend_from_slice(&HEADER_END);
    data
}

fn classes_section() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&CLASSES_START);
    data.extend_from_slice(&0i32.to_le_bytes());
    let crc = crc16(&data, 0xC0C1);
    data.extend_from_slice(&crc.to_le_bytes());
    data.extend_from_slice(&CLASSES_END);
    data
}

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
    // Bit 6 of the final byte is the sign; borrow a byte when it is taken.
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

fn object_map_section(entries: &[(u64, i64)]) -> Vec<u8> {
    let mut payload = Vec::new();
    let mut last_handle = 0u64;
    let mut last_offset = 0i64;
    for &(handle, offset) in entries {
        write_mc(&mut payload, handle - last_handle);
        write_signed_mc(&mut payload, offset - last_offset);
        last_handle = handle;
        last_offset = offset;
    }

    let mut data = Vec::new();
    data.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(&payload);
    let crc = crc16(&data, 0xC0C1);
    data.extend_from_slice(&crc.to_be_bytes());

    let terminator = 2u16.to_be_bytes();
    data.extend_from_slice(&terminator);
    let crc = crc16(&terminator, 0xC0C1);
    data.extend_from_slice(&crc.to_be_bytes());
    data
}

fn file_header(locators: &[(u8, i32, i32)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"AC1015");
    data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0]);
    data.extend_from_slice(&(-1i32).to_le_bytes()); // no preview
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&30u16.to_le_bytes()); // code page
    data.extend_from_slice(&(locators.len() as i32).to_le_bytes());
    for &(id, seeker, size) in locators {
        data.push(id);
        data.extend_from_slice(&seeker.to_le_bytes());
        data.extend_from_slice(&size.to_le_bytes());
    }
    let crc = crc16(&data, 0xC0C1);
    data.extend_from_slice(&crc.to_le_bytes());
    data.extend_from_slice(&FILE_HEADER_END);
    data
}

/// The byte length of a file header carrying three locator records.
fn file_header_len() -> usize {
    file_header(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]).len()
}

/// Assemble a complete AC1015 file around the given object records.
pub fn build_document(objects: &[ObjectRecord]) -> Vec<u8> {
    let variables = drawing_variables_section();
    let classes = classes_section();

    let variables_offset = file_header_len();
    let classes_offset = variables_offset + variables.len();
    let objects_offset = classes_offset + classes.len();

    let mut object_area = Vec::new();
    let mut entries = Vec::new();
    for record in objects {
        entries.push((
            record.handle,
            (objects_offset + object_area.len()) as i64,
        ));
        object_area.extend_from_slice(&record.bytes);
    }

    let map_offset = objects_offset + object_area.len();
    let map = object_map_section(&entries);

    let mut data = file_header(&[
        (0, variables_offset as i32, variables.len() as i32),
        (1, classes_offset as i32, classes.len() as i32),
        (2, map_offset as i32, map.len() as i32),
    ]);
    data.extend_from_slice(&variables);
    data.extend_from_slice(&classes);
    data.extend_from_slice(&object_area);
    data.extend_from_slice(&map);
    data
}
