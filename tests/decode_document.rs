//! End-to-end decoding of synthetic AC1015 documents.

mod common;

use common::{
    block_header_record, build_document, circle_record, insert_record, truncated_record,
    unclassed_record,
};
use dwg_decode::{
    decode, decode_with_options, DecodeOptions, Handle, NotificationType, ObjectRef,
    ObjectVariant, Vector3,
};

#[test]
fn circle_round_trip() {
    let data = build_document(&[circle_record(0x20, Vector3::new(1.0, 2.0, 0.0), 5.0)]);
    let graph = decode(&data).unwrap();

    assert_eq!(graph.object_count(), 1);
    assert_eq!(graph.entity_count(), 1);

    let object = graph.object_by_handle(0x20).unwrap();
    match &object.variant {
        ObjectVariant::Circle(circle) => {
            assert_eq!(circle.radius, 5.0);
            assert_eq!(circle.center, Vector3::new(1.0, 2.0, 0.0));
            assert_eq!(circle.thickness, 0.0);
            assert_eq!(circle.normal, Vector3::UNIT_Z);
        }
        other => panic!("expected a circle, got {}", other.name()),
    }
}

#[test]
fn drawing_variables_are_decoded() {
    let data = build_document(&[circle_record(0x20, Vector3::new(0.0, 0.0, 0.0), 1.0)]);
    let graph = decode(&data).unwrap();

    assert_eq!(graph.header.linear_unit_format, 2);
    assert_eq!(graph.header.linear_unit_precision, 4);
    assert_eq!(graph.header.isolines, 4);
    assert_eq!(graph.header.text_height, 2.5);
    assert!(graph.header.proxy_graphics);
}

#[test]
fn insert_resolves_to_block_header() {
    let data = build_document(&[
        block_header_record(0x30, "CHAIR"),
        insert_record(0x31, 0x30),
    ]);
    let graph = decode(&data).unwrap();
    assert_eq!(graph.object_count(), 2);

    let block_index = *graph.handle_index.get(&Handle::new(0x30)).unwrap();
    match &graph.object_by_handle(0x31).unwrap().variant {
        ObjectVariant::Insert(insert) => {
            assert_eq!(insert.block_header, ObjectRef::Index(block_index));
            assert_eq!(insert.scale, Vector3::new(1.0, 1.0, 1.0));
            assert!(!insert.has_attributes);
        }
        other => panic!("expected an insert, got {}", other.name()),
    }

    match &graph.object(block_index).unwrap().variant {
        ObjectVariant::BlockHeader(block) => assert_eq!(block.record.name, "CHAIR"),
        other => panic!("expected a block header, got {}", other.name()),
    }
}

#[test]
fn bad_object_is_isolated() {
    let bad = truncated_record(0x21);
    // The record's own bytes past the two-byte MS size prefix.
    let bad_body = bad.bytes[2..].to_vec();
    let data = build_document(&[
        circle_record(0x20, Vector3::new(0.0, 0.0, 0.0), 5.0),
        bad,
        circle_record(0x22, Vector3::new(3.0, 4.0, 0.0), 7.0),
    ]);
    let graph = decode(&data).unwrap();

    // Every map entry yields exactly one row, the bad one included.
    assert_eq!(graph.object_count(), 3);
    match &graph.object_by_handle(0x21).unwrap().variant {
        ObjectVariant::Errored { raw, .. } => {
            // The stored bytes survive for re-inspection.
            assert!(!raw.is_empty());
            assert!(raw.starts_with(&bad_body));
        }
        other => panic!("expected an errored row, got {}", other.name()),
    }
    assert!(graph.notifications.has_type(NotificationType::Error));

    match &graph.object_by_handle(0x22).unwrap().variant {
        ObjectVariant::Circle(circle) => assert_eq!(circle.radius, 7.0),
        other => panic!("expected a circle, got {}", other.name()),
    }
}

#[test]
fn unclassed_object_keeps_raw_bytes() {
    let record = unclassed_record(0x40);
    let body = record.bytes[2..].to_vec();
    let data = build_document(&[record]);
    let graph = decode(&data).unwrap();

    match &graph.object_by_handle(0x40).unwrap().variant {
        ObjectVariant::UnknownObject(unknown) => {
            assert!(unknown.dxf_name.is_empty());
            assert_eq!(unknown.raw, body);
        }
        other => panic!("expected an unknown object, got {}", other.name()),
    }
    assert!(graph.notifications.has_type(NotificationType::Warning));
}

#[test]
fn strict_mode_propagates_object_failures() {
    let data = build_document(&[truncated_record(0x21)]);
    let options = DecodeOptions {
        tolerant: false,
        ..DecodeOptions::default()
    };
    assert!(decode_with_options(&data, options).is_err());
}

#[test]
fn dangling_reference_becomes_warning() {
    // INSERT pointing at a block header the file does not contain.
    let data = build_document(&[insert_record(0x31, 0x99)]);
    let graph = decode(&data).unwrap();

    match &graph.object_by_handle(0x31).unwrap().variant {
        ObjectVariant::Insert(insert) => {
            assert_eq!(insert.block_header, ObjectRef::Dangling(Handle::new(0x99)));
        }
        other => panic!("expected an insert, got {}", other.name()),
    }
    assert!(graph.notifications.has_type(NotificationType::Warning));
}

#[test]
fn empty_buffer_is_rejected() {
    assert!(decode(&[]).is_err());
}

#[test]
fn corrupt_file_header_sentinel_is_rejected() {
    let mut data = build_document(&[circle_record(0x20, Vector3::new(0.0, 0.0, 0.0), 1.0)]);
    // The end sentinel sits right after the three locator records.
    let sentinel_start = 6 + 7 + 4 + 2 + 2 + 4 + 3 * 13 + 2;
    data[sentinel_start] ^= 0xFF;
    assert!(decode(&data).is_err());
}

#[test]
fn later_revisions_are_unsupported() {
    let mut data = build_document(&[circle_record(0x20, Vector3::new(0.0, 0.0, 0.0), 1.0)]);
    data[..6].copy_from_slice(b"AC1018");
    assert!(matches!(
        decode(&data),
        Err(dwg_decode::DecodeError::UnsupportedVersion(_))
    ));
}
