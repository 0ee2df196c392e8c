use alloc::collections::LinkedList;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::mem::size_of;

use crate::{
    AllocLimit, Append, ArchiveKind, ByteOrder, ByteView, Error, Reader, Reserve, Resize,
    SizePrefix, Writer, from_slice, to_slice, to_vec,
};

// =============================================================================
// Storage views
// =============================================================================

#[test]
fn test_kind() {
    let mut buf: Vec<u8> = Vec::new();
    assert_eq!(Writer::new(&mut buf).kind(), ArchiveKind::Output);
    assert_eq!(Reader::new(&buf).kind(), ArchiveKind::Input);
}

#[test]
fn test_growable_grows_and_trims() {
    let mut buf: Vec<u8> = Vec::new();
    let mut w = Writer::new(&mut buf);
    w.write(&1u32).unwrap();
    w.write(&vec![0u8; 1000]).unwrap();
    assert_eq!(w.position(), 4 + 4 + 1000);
    assert_eq!(w.written().len(), 1008);
    assert_eq!(buf.len(), 1008);
}

#[test]
fn test_fixed_overflow_keeps_length() {
    let mut storage = [0u8; 6];
    let mut w = Writer::new(&mut storage);
    w.write(&1u32).unwrap();
    assert_eq!(w.remaining(), 2);
    assert_eq!(
        w.write(&2u32),
        Err(Error::OutOfRange {
            needed: 4,
            available: 2
        })
    );
    assert_eq!(w.position(), 4);
    assert_eq!(w.view().len(), 6);
    assert_eq!(storage[..4], [1, 0, 0, 0]);
}

#[test]
fn test_read_only_view_rejects_writes() {
    let data = [0u8; 4];
    let mut w = Writer::new(&data[..]);
    assert_eq!(w.write(&1u8), Err(Error::ReadOnly));
    assert_eq!(w.position(), 0);
}

#[test]
fn test_view_shapes() {
    let mut owned = vec![1u8, 2, 3];
    let view = ByteView::from(&mut owned);
    assert!(view.is_growable());
    assert_eq!(view.len(), 3);

    let mut fixed = [0u8; 2];
    let mut view = ByteView::from(&mut fixed);
    assert!(!view.is_growable());
    assert!(view.as_mut_slice().is_some());
    assert!(!view.resize(10));
    assert_eq!(view.len(), 2);

    let frozen = [5u8];
    let mut view = ByteView::from(&frozen);
    assert!(view.as_mut_slice().is_none());
    assert_eq!(view.into_slice(), [5]);
}

#[test]
fn test_reset_clamps_cursor() {
    let mut buf: Vec<u8> = vec![0; 4];
    let mut w = Writer::new(&mut buf);
    w.reset(100);
    assert_eq!(w.position(), 4);
    w.reset(1);
    w.write(&9u8).unwrap();
    assert_eq!(buf, [0, 9]);

    let data = [1u8, 2, 3];
    let mut r = Reader::new(&data);
    r.reset(10);
    assert_eq!(r.position(), 3);
    r.reset(2);
    assert_eq!(r.read::<u8>().unwrap(), 3);
}

#[test]
fn test_to_slice_reports_length() {
    let mut storage = [0u8; 16];
    let n = to_slice(&(1u16, 2u8), &mut storage).unwrap();
    assert_eq!(n, 3);
    assert_eq!(storage[..3], [1, 0, 2]);

    let mut tiny = [0u8; 1];
    assert!(matches!(to_slice(&1u16, &mut tiny), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_trailing_bytes_ignored() {
    assert_eq!(from_slice::<u8>(&[1, 2, 3]).unwrap(), 1);
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_append_starts_at_end() {
    let mut buf: Vec<u8> = vec![0xAA, 0xBB];
    Writer::with_options(&mut buf, Append).write(&1u8).unwrap();
    assert_eq!(buf, [0xAA, 0xBB, 1]);

    let mut buf: Vec<u8> = vec![0xAA, 0xBB];
    Writer::new(&mut buf).write(&1u8).unwrap();
    assert_eq!(buf, [1]);
}

#[test]
fn test_append_ignored_on_fixed() {
    let mut storage = [0xFFu8; 2];
    let w = Writer::with_options(&mut storage, Append);
    assert_eq!(w.position(), 0);
}

#[test]
fn test_reserve_and_resize() {
    let mut buf: Vec<u8> = Vec::new();
    let w = Writer::with_options(&mut buf, Reserve(256));
    assert_eq!(w.view().len(), 0);
    drop(w);
    assert!(buf.capacity() >= 256);

    let mut buf: Vec<u8> = vec![1, 2, 3, 4];
    let mut w = Writer::with_options(&mut buf, (Append, Resize(2)));
    assert_eq!(w.position(), 2);
    assert_eq!(w.remaining(), 0);
    w.write(&7u8).unwrap();
    assert_eq!(buf, [1, 2, 7]);
}

#[test]
fn test_option_tuples_nest() {
    let mut a: Vec<u8> = Vec::new();
    let mut b: Vec<u8> = Vec::new();
    Writer::with_options(&mut a, ((ByteOrder::Big, SizePrefix::U16), Reserve(8)))
        .write(&vec![1u16])
        .unwrap();
    Writer::with_options(&mut b, (ByteOrder::Big, (SizePrefix::U16, Reserve(8))))
        .write(&vec![1u16])
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a, [0, 1, 0, 1]);
}

#[test]
fn test_config_is_resolved() {
    let mut buf: Vec<u8> = Vec::new();
    let w = Writer::with_options(&mut buf, (ByteOrder::Swapped, SizePrefix::Varint));
    assert!(matches!(w.byte_order(), ByteOrder::Little | ByteOrder::Big));
    assert!(!w.byte_order().is_native());
    assert_eq!(w.size_prefix(), SizePrefix::Varint);
    assert_eq!(w.config().limit(), None);

    let r = Reader::with_options(&buf, (ByteOrder::Native, AllocLimit(10)));
    assert!(r.byte_order().is_native());
    assert_eq!(r.limit(), Some(10));
}

#[test]
fn test_writer_only_options_are_inert_on_reader() {
    let data = [3u8];
    let mut r = Reader::with_options(&data, (Append, Reserve(64), Resize(0)));
    assert_eq!(r.position(), 0);
    assert_eq!(r.read::<u8>().unwrap(), 3);
}

// =============================================================================
// Hostile input
// =============================================================================

#[test]
fn test_alloc_limit() {
    let bytes = to_vec(&vec![0u32; 1000]).unwrap();
    let mut r = Reader::with_options(&bytes, AllocLimit(100));
    assert_eq!(
        r.read::<Vec<u32>>(),
        Err(Error::AllocLimit {
            requested: 4000,
            limit: 100
        })
    );

    let mut r = Reader::with_options(&bytes, AllocLimit(4000));
    assert_eq!(r.read::<Vec<u32>>().unwrap().len(), 1000);
}

#[test]
fn test_alloc_limit_applies_to_strings() {
    let bytes = to_vec("too long for the limit").unwrap();
    let mut r = Reader::with_options(&bytes, AllocLimit(4));
    assert!(matches!(r.read::<String>(), Err(Error::AllocLimit { .. })));
}

#[test]
fn test_alloc_limit_charges_zero_sized_elements() {
    let bytes = 1_000_000u32.to_le_bytes();

    let mut r = Reader::with_options(&bytes, AllocLimit(64));
    assert_eq!(
        r.read::<Vec<()>>(),
        Err(Error::AllocLimit {
            requested: 1_000_000,
            limit: 64
        })
    );
    assert_eq!(r.position(), 4);

    let mut r = Reader::with_options(&bytes, AllocLimit(64));
    assert!(matches!(
        r.read::<Vec<PhantomData<u64>>>(),
        Err(Error::AllocLimit { requested: 1_000_000, .. })
    ));

    let mut dest = vec![(); 3];
    let mut r = Reader::with_options(&bytes, AllocLimit(64));
    assert!(matches!(r.read_into(&mut dest), Err(Error::AllocLimit { .. })));
    assert_eq!(dest.len(), 3);

    let mut r = Reader::with_options(&bytes, AllocLimit(1_000_000));
    assert_eq!(r.read::<Vec<()>>().unwrap().len(), 1_000_000);
}

#[test]
fn test_alloc_limit_charges_list_nodes() {
    let bytes = 1_000_000u32.to_le_bytes();
    let mut r = Reader::with_options(&bytes, AllocLimit(64));
    assert_eq!(
        r.read::<LinkedList<()>>(),
        Err(Error::AllocLimit {
            requested: 1_000_000 * size_of::<((), usize, usize)>(),
            limit: 64
        })
    );

    // Ten bytes of payload, but ten nodes.
    let bytes = to_vec(&(0u8..10).collect::<LinkedList<u8>>()).unwrap();
    let mut r = Reader::with_options(&bytes, AllocLimit(64));
    assert!(matches!(r.read::<LinkedList<u8>>(), Err(Error::AllocLimit { .. })));

    let mut r = Reader::with_options(&bytes, AllocLimit(10 * size_of::<(u8, usize, usize)>()));
    assert_eq!(r.read::<LinkedList<u8>>().unwrap().len(), 10);
}

#[test]
fn test_dense_prefix_beyond_input_in_foreign_order() {
    let mut bytes = 1000u32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&[0; 8]);
    let mut r = Reader::with_options(&bytes, ByteOrder::Big);
    assert_eq!(
        r.read::<Vec<u32>>(),
        Err(Error::OutOfRange {
            needed: 4000,
            available: 8
        })
    );
}

#[test]
fn test_huge_prefix_without_data() {
    let bytes = u32::MAX.to_le_bytes();
    assert!(matches!(from_slice::<Vec<u64>>(&bytes), Err(Error::OutOfRange { .. })));
    assert!(matches!(from_slice::<Vec<String>>(&bytes), Err(Error::OutOfRange { .. })));
    assert!(matches!(from_slice::<String>(&bytes), Err(Error::OutOfRange { .. })));

    let mut r = Reader::with_options(&bytes[..], SizePrefix::U32);
    assert!(matches!(r.view::<&[u8]>(), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_huge_varint_prefix() {
    let mut bytes = vec![0xFFu8; 9];
    bytes.push(0x01);
    let mut r = Reader::with_options(&bytes, SizePrefix::Varint);
    assert!(r.read::<Vec<u8>>().is_err());
}

#[cfg(feature = "std")]
#[test]
fn test_error_converts_to_io() {
    use std::io::ErrorKind;

    let err: std::io::Error = Error::OutOfRange {
        needed: 4,
        available: 0,
    }
    .into();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

    let err: std::io::Error = Error::ReadOnly.into();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[test]
fn test_error_display() {
    use alloc::string::ToString;

    let err = Error::InvalidDiscriminant {
        tag: 9,
        alternatives: 3,
    };
    assert_eq!(
        err.to_string(),
        "invalid discriminant 9: type has 3 alternatives"
    );
    assert_eq!(Error::ReadOnly.to_string(), "cannot write to a read-only view");
}
