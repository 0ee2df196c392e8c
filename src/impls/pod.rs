use core::mem::size_of;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::layout::{self, Layout};
use crate::{Decode, Encode, Error, Reader, Result, Writer};

/// Copies a plain-old-data value as its raw in-memory bytes.
///
/// `T` must be proven padding-free and valid for every bit pattern by
/// zerocopy. The bytes are written as they sit in memory, so the archive's
/// byte order does not apply: use `Pod` for byte arrays, hashes, keys and
/// other values that already have a fixed representation.
///
/// ```
/// use bytearc::{Pod, Reader, Writer};
///
/// let mut buf: Vec<u8> = Vec::new();
/// let mut w = Writer::new(&mut buf);
/// w.write(&Pod([0xAB_u8; 32])).unwrap();
/// assert_eq!(buf.len(), 32);
///
/// let key: Pod<[u8; 32]> = Reader::new(&buf).read().unwrap();
/// assert_eq!(key.0, [0xAB; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Pod<T>(pub T);

impl<T> Pod<T> {
    /// Unwrap the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Pod<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: FromBytes + IntoBytes + Immutable> Encode for Pod<T> {
    // SAFETY: `Pod<T>` is a transparent wrapper around a type zerocopy proves
    // padding-free and valid for every bit pattern.
    const LAYOUT: Layout<Self> = unsafe { Layout::dense() };

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_bytes(self.0.as_bytes())
    }

    #[inline]
    fn encode_slice(items: &[Self], writer: &mut Writer<'_>) -> Result<()> {
        // SAFETY: dense, see `LAYOUT`.
        writer.put_bytes(unsafe { layout::slice_bytes(items) })
    }
}

impl<T: FromBytes + IntoBytes + Immutable> Decode for Pod<T> {
    // SAFETY: as for `Encode`.
    const LAYOUT: Layout<Self> = unsafe { Layout::dense() };

    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let bytes = reader.take(size_of::<T>())?;
        T::read_from_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidData {
                message: "pod size mismatch",
            })
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        reader.read_exact(self.0.as_mut_bytes())
    }

    #[inline]
    fn decode_slice_in_place(items: &mut [Self], reader: &mut Reader<'_>) -> Result<()> {
        // SAFETY: dense, see `LAYOUT`.
        reader.read_exact(unsafe { layout::slice_bytes_mut(items) })
    }
}
