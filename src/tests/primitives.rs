use alloc::vec::Vec;

use crate::{ByteOrder, Decode, Encode, Error, Reader, Writer, from_slice, to_vec};

fn encode_with<T: Encode + ?Sized>(value: &T, order: ByteOrder) -> Vec<u8> {
    let mut buf = Vec::new();
    Writer::with_options(&mut buf, order).write(value).unwrap();
    buf
}

fn decode_with<T: Decode>(bytes: &[u8], order: ByteOrder) -> T {
    Reader::with_options(bytes, order).read().unwrap()
}

#[test]
fn test_integers_little_endian_by_default() {
    assert_eq!(to_vec(&0x12u8).unwrap(), [0x12]);
    assert_eq!(to_vec(&0x1234u16).unwrap(), [0x34, 0x12]);
    assert_eq!(to_vec(&0x12345678u32).unwrap(), [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(
        to_vec(&0x0102030405060708u64).unwrap(),
        [8, 7, 6, 5, 4, 3, 2, 1]
    );
    assert_eq!(to_vec(&-1i16).unwrap(), [0xFF, 0xFF]);
    assert_eq!(to_vec(&1u128).unwrap().len(), 16);
}

#[test]
fn test_integers_big_endian() {
    assert_eq!(encode_with(&0x1234u16, ByteOrder::Big), [0x12, 0x34]);
    assert_eq!(
        encode_with(&0x12345678u32, ByteOrder::Big),
        [0x12, 0x34, 0x56, 0x78]
    );
    assert_eq!(decode_with::<u32>(&[0x12, 0x34, 0x56, 0x78], ByteOrder::Big), 0x12345678);
    assert_eq!(decode_with::<i64>(&[0xFF; 8], ByteOrder::Big), -1);
}

#[test]
fn test_native_and_swapped_resolve() {
    let native = encode_with(&0xABCDu16, ByteOrder::Native);
    assert_eq!(native, 0xABCDu16.to_ne_bytes());

    let swapped = encode_with(&0xABCDu16, ByteOrder::Swapped);
    assert_eq!(swapped, 0xABCDu16.swap_bytes().to_ne_bytes());

    assert!(ByteOrder::Native.is_native());
    assert!(!ByteOrder::Swapped.is_native());
    assert!(matches!(ByteOrder::Native.resolve(), ByteOrder::Little | ByteOrder::Big));
}

#[test]
fn test_floats_roundtrip() {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let bytes = encode_with(&core::f64::consts::PI, order);
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode_with::<f64>(&bytes, order), core::f64::consts::PI);

        let bytes = encode_with(&-0.5f32, order);
        assert_eq!(decode_with::<f32>(&bytes, order), -0.5);
    }
    assert_eq!(to_vec(&1.0f32).unwrap(), 1.0f32.to_le_bytes());
}

#[test]
fn test_wide_integers_roundtrip() {
    let value = i128::MIN + 12345;
    assert_eq!(from_slice::<i128>(&to_vec(&value).unwrap()).unwrap(), value);
    assert_eq!(
        decode_with::<u128>(&encode_with(&u128::MAX, ByteOrder::Big), ByteOrder::Big),
        u128::MAX
    );
}

#[test]
fn test_usize_is_eight_bytes() {
    let bytes = to_vec(&123usize).unwrap();
    assert_eq!(bytes, [123, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(from_slice::<usize>(&bytes).unwrap(), 123);
    assert_eq!(from_slice::<isize>(&to_vec(&-5isize).unwrap()).unwrap(), -5);
}

#[cfg(target_pointer_width = "32")]
#[test]
fn test_usize_overflow_rejected() {
    let bytes = to_vec(&u64::MAX).unwrap();
    assert!(matches!(from_slice::<usize>(&bytes), Err(Error::InvalidData { .. })));
}

#[test]
fn test_bool() {
    assert_eq!(to_vec(&true).unwrap(), [1]);
    assert_eq!(to_vec(&false).unwrap(), [0]);
    assert!(from_slice::<bool>(&[1]).unwrap());
    assert!(!from_slice::<bool>(&[0]).unwrap());
    assert!(matches!(from_slice::<bool>(&[2]), Err(Error::InvalidData { .. })));
}

#[test]
fn test_char() {
    let bytes = to_vec(&'é').unwrap();
    assert_eq!(bytes, ('é' as u32).to_le_bytes());
    assert_eq!(from_slice::<char>(&bytes).unwrap(), 'é');

    let surrogate = 0xD800u32.to_le_bytes();
    assert!(matches!(from_slice::<char>(&surrogate), Err(Error::InvalidData { .. })));
}

#[test]
fn test_unit_and_phantom_are_empty() {
    assert!(to_vec(&()).unwrap().is_empty());
    assert!(to_vec(&core::marker::PhantomData::<u64>).unwrap().is_empty());
    assert_eq!(from_slice::<()>(&[]), Ok(()));
}

#[test]
fn test_truncated_input() {
    assert_eq!(
        from_slice::<u32>(&[1, 2]),
        Err(Error::OutOfRange {
            needed: 4,
            available: 2
        })
    );
    assert!(matches!(from_slice::<u8>(&[]), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_in_place_primitive() {
    let mut value = 0u16;
    let mut r = Reader::new(&[5u8, 0, 6, 0]);
    r.read_into(&mut value).unwrap();
    assert_eq!(value, 5);
    r.read_into(&mut value).unwrap();
    assert_eq!(value, 6);
    assert!(r.is_empty());
}
