use alloc::vec;
use alloc::vec::Vec;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::layout::{FieldLayout, Layout};
use crate::{ByteOrder, Decode, Encode, Pod, Reader, Writer, from_slice, to_vec};

#[test]
fn test_primitive_layouts() {
    assert!(<u32 as Encode>::LAYOUT.is_dense());
    assert_eq!(<u32 as Encode>::LAYOUT.size(), 4);
    assert!(<f64 as Decode>::LAYOUT.is_dense());
    assert!(<() as Encode>::LAYOUT.is_dense());
    assert_eq!(<() as Encode>::LAYOUT.size(), 0);
}

#[test]
fn test_validated_types_are_opaque() {
    assert!(!<bool as Decode>::LAYOUT.is_dense());
    assert!(!<char as Decode>::LAYOUT.is_dense());
    assert!(!<Option<u8> as Encode>::LAYOUT.is_dense());
    assert!(!<Vec<u8> as Encode>::LAYOUT.is_dense());
    assert!(!<(u8, u8) as Encode>::LAYOUT.is_dense());
}

#[test]
fn test_array_layout() {
    assert!(<[u16; 8] as Encode>::LAYOUT.is_dense());
    assert_eq!(<[u16; 8] as Encode>::LAYOUT.size(), 16);
    assert!(<[[u8; 3]; 3] as Encode>::LAYOUT.is_dense());
    assert!(!<[bool; 4] as Encode>::LAYOUT.is_dense());
}

#[allow(dead_code)]
#[repr(C)]
struct Pair {
    a: u32,
    b: u32,
}

#[allow(dead_code)]
#[repr(C)]
struct Gap {
    a: u8,
    b: u32,
}

#[test]
fn test_aggregate_layout() {
    let fields = [<u32 as Encode>::LAYOUT.field(), <u32 as Encode>::LAYOUT.field()];
    // SAFETY: both fields of `Pair`, in order.
    let pair: Layout<Pair> = unsafe { Layout::aggregate(&fields) };
    assert!(pair.is_dense());
    assert_eq!(pair.size(), 8);

    let fields = [<u8 as Encode>::LAYOUT.field(), <u32 as Encode>::LAYOUT.field()];
    // SAFETY: both fields of `Gap`, in order.
    let gap: Layout<Gap> = unsafe { Layout::aggregate(&fields) };
    assert!(!gap.is_dense());

    let opaque: FieldLayout = <bool as Encode>::LAYOUT.field();
    // SAFETY: `Pair` has two fields; the opaque one stands in for `b`.
    let mixed: Layout<Pair> = unsafe { Layout::aggregate(&[fields[1], opaque]) };
    assert!(!mixed.is_dense());
}

#[test]
fn test_bulk_path_matches_member_wise_bytes() {
    let values: Vec<u32> = (0..64).map(|i| i * 0x01010101).collect();
    let bulk = to_vec(&values).unwrap();

    let mut member_wise = Vec::new();
    member_wise.extend_from_slice(&64u32.to_le_bytes());
    for v in &values {
        member_wise.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(bulk, member_wise);
}

#[test]
fn test_dense_sequence_in_foreign_order() {
    let order = if cfg!(target_endian = "little") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
    let values = vec![0x0102u16, 0x0304];

    let mut buf: Vec<u8> = Vec::new();
    Writer::with_options(&mut buf, order).write(&values).unwrap();
    let expected_head = if cfg!(target_endian = "little") {
        [0, 0, 0, 2, 1, 2]
    } else {
        [2, 0, 0, 0, 2, 1]
    };
    assert_eq!(buf[..6], expected_head);

    let back: Vec<u16> = Reader::with_options(&buf, order).read().unwrap();
    assert_eq!(back, values);
}

#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable)]
#[repr(C)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

#[test]
fn test_pod_ignores_byte_order() {
    let mut buf: Vec<u8> = Vec::new();
    Writer::with_options(&mut buf, ByteOrder::Big)
        .write(&Pod(0x0102u16))
        .unwrap();
    assert_eq!(buf, 0x0102u16.to_ne_bytes());

    let back: Pod<u16> = Reader::with_options(&buf, ByteOrder::Big).read().unwrap();
    assert_eq!(back.into_inner(), 0x0102);
}

#[test]
fn test_pod_struct_sequence() {
    assert!(<Pod<Rgb> as Encode>::LAYOUT.is_dense());

    let pixels: Vec<Pod<Rgb>> = (0..10u8)
        .map(|i| Pod(Rgb { r: i, g: i + 1, b: i + 2 }))
        .collect();
    let bytes = to_vec(&pixels).unwrap();
    assert_eq!(bytes.len(), 4 + 30);
    assert_eq!(bytes[4..7], [0, 1, 2]);

    let back: Vec<Pod<Rgb>> = from_slice(&bytes).unwrap();
    assert_eq!(back, pixels);
}
