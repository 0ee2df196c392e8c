//! LEB128 variable-length integers, used by [`SizePrefix::Varint`].
//!
//! Seven value bits per byte, least significant group first; the high bit
//! marks a continuation.
//!
//! [`SizePrefix::Varint`]: crate::SizePrefix::Varint

use crate::{Error, Reader, Result, Writer};

/// Longest encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Number of bytes `value` encodes to.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encode `value` into `buf`, returning the number of bytes used.
pub fn encode_to(mut value: u64, buf: &mut [u8; MAX_LEN]) -> usize {
    let mut n = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[n] = byte;
            return n + 1;
        }
        buf[n] = byte | 0x80;
        n += 1;
    }
}

/// Encode `value` at the writer's cursor.
pub fn encode(value: u64, writer: &mut Writer<'_>) -> Result<()> {
    let mut buf = [0u8; MAX_LEN];
    let n = encode_to(value, &mut buf);
    writer.put_bytes(&buf[..n])
}

/// Decode a `u64` at the reader's cursor.
///
/// Fails with [`Error::InvalidData`] on encodings longer than [`MAX_LEN`]
/// bytes, ones that overflow 64 bits, and ones padded with trailing zero
/// groups.
pub fn decode(reader: &mut Reader<'_>) -> Result<u64> {
    let mut value = 0u64;
    for i in 0..MAX_LEN {
        let [byte] = reader.take_array::<1>()?;
        // The tenth byte holds only the top bit of a u64.
        if i == MAX_LEN - 1 && byte > 1 {
            return Err(Error::InvalidData {
                message: "varint overflows u64",
            });
        }
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            // A zero final group could have been left off.
            if i > 0 && byte == 0 {
                return Err(Error::InvalidData {
                    message: "non-canonical varint",
                });
            }
            return Ok(value);
        }
    }
    Err(Error::InvalidData {
        message: "varint longer than 10 bytes",
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec::Vec;

    fn roundtrip(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut w = Writer::new(&mut buf);
        encode(value, &mut w).unwrap();
        let end = w.position();
        drop(w);
        buf.truncate(end);
        let mut r = Reader::new(&buf);
        assert_eq!(decode(&mut r).unwrap(), value);
        assert!(r.is_empty());
        buf
    }

    #[test]
    fn known_encodings() {
        assert_eq!(roundtrip(0), [0x00]);
        assert_eq!(roundtrip(127), [0x7F]);
        assert_eq!(roundtrip(128), [0x80, 0x01]);
        assert_eq!(roundtrip(300), [0xAC, 0x02]);
        assert_eq!(roundtrip(u64::MAX).len(), MAX_LEN);
    }

    #[test]
    fn encoded_len_matches() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u64::from(u32::MAX), u64::MAX] {
            assert_eq!(encoded_len(value), roundtrip(value).len(), "{value}");
        }
    }

    #[test]
    fn rejects_overflow() {
        let bytes = [0xFF; 9].into_iter().chain([0x02]).collect::<Vec<u8>>();
        let mut r = Reader::new(&bytes);
        assert!(matches!(decode(&mut r), Err(Error::InvalidData { .. })));
    }

    #[test]
    fn rejects_overlong() {
        let bytes = [0x80; 11];
        let mut r = Reader::new(&bytes);
        assert!(matches!(decode(&mut r), Err(Error::InvalidData { .. })));
    }

    #[test]
    fn rejects_non_canonical() {
        for bytes in [&[0x80u8, 0x00][..], &[0xAC, 0x82, 0x00], &[0x81, 0x80, 0x00]] {
            let mut r = Reader::new(bytes);
            assert!(
                matches!(decode(&mut r), Err(Error::InvalidData { .. })),
                "{bytes:?}"
            );
        }

        let mut r = Reader::new(&[0u8][..]);
        assert_eq!(decode(&mut r).unwrap(), 0);
    }

    #[test]
    fn truncated_is_out_of_range() {
        let bytes = [0x80, 0x80];
        let mut r = Reader::new(&bytes);
        assert!(matches!(decode(&mut r), Err(Error::OutOfRange { .. })));
    }
}
