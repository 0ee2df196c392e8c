//! Encode and decode traits.

use alloc::vec::Vec;

use crate::layout::{self, Layout};
use crate::{Reader, Result, Writer};

/// Direction of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Decodes values out of bytes.
    Input,
    /// Encodes values into bytes.
    Output,
}

/// Encode a value at a writer's cursor.
///
/// # Example
///
/// ```
/// use bytearc::{Encode, Writer};
///
/// let mut buf: Vec<u8> = Vec::new();
/// let mut w = Writer::new(&mut buf);
/// 42u32.encode(&mut w).unwrap();
/// assert_eq!(w.written(), [42, 0, 0, 0]);
/// ```
pub trait Encode {
    /// Byte-layout classification. Dense types are copied in one piece.
    const LAYOUT: Layout<Self> = Layout::OPAQUE;

    /// Encode `self`, advancing the cursor past the produced bytes.
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()>;

    /// Encode a contiguous run of values.
    ///
    /// Takes a single bulk copy when `Self` is dense and the writer's byte
    /// order matches the host.
    #[inline]
    fn encode_slice(items: &[Self], writer: &mut Writer<'_>) -> Result<()>
    where
        Self: Sized,
    {
        if Self::LAYOUT.is_dense() && writer.byte_order().is_native() {
            // SAFETY: a dense layout is only constructible for types without
            // padding, so every byte of `items` is initialized.
            return writer.put_bytes(unsafe { layout::slice_bytes(items) });
        }
        items.iter().try_for_each(|item| item.encode(writer))
    }
}

/// Decode a value at a reader's cursor.
///
/// # Example
///
/// ```
/// use bytearc::{Decode, Reader};
///
/// let bytes = [42u8, 0, 0, 0];
/// let mut r = Reader::new(&bytes);
/// assert_eq!(u32::decode(&mut r).unwrap(), 42);
/// assert_eq!(r.position(), 4);
/// ```
pub trait Decode: Sized {
    /// Byte-layout classification. Dense types are copied in one piece.
    const LAYOUT: Layout<Self> = Layout::OPAQUE;

    /// Decode a fresh value.
    fn decode(reader: &mut Reader<'_>) -> Result<Self>;

    /// Decode into an existing value.
    ///
    /// The default decodes into scratch storage and moves the result in, so
    /// `self` is untouched on failure.
    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        *self = Self::decode(reader)?;
        Ok(())
    }

    /// Decode into each element of an existing run of values.
    #[inline]
    fn decode_slice_in_place(items: &mut [Self], reader: &mut Reader<'_>) -> Result<()> {
        if Self::LAYOUT.is_dense() && reader.byte_order().is_native() {
            // SAFETY: dense layouts have no padding and accept every bit
            // pattern.
            return reader.read_exact(unsafe { layout::slice_bytes_mut(items) });
        }
        items.iter_mut().try_for_each(|item| item.decode_in_place(reader))
    }

    /// Decode `len` fresh values.
    ///
    /// Callers decoding an untrusted length check it with
    /// [`Reader::check_alloc`] first.
    fn decode_vec(len: usize, reader: &mut Reader<'_>) -> Result<Vec<Self>> {
        if Self::LAYOUT.is_dense() {
            if reader.byte_order().is_native() {
                return layout::read_dense_vec(len, reader);
            }
            // Dense values encode to exactly their size in either order.
            let needed = len.saturating_mul(Self::LAYOUT.size());
            let available = reader.remaining();
            if needed > available {
                return Err(crate::Error::OutOfRange { needed, available });
            }
        }
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(Self::decode(reader)?);
        }
        Ok(items)
    }
}

/// Borrow a value directly out of a reader's storage.
///
/// ```
/// use bytearc::{Reader, to_vec};
///
/// let bytes = to_vec("hello").unwrap();
/// let mut r = Reader::new(&bytes);
/// let s: &str = r.view().unwrap();
/// assert_eq!(s, "hello");
/// ```
pub trait View<'a>: Sized {
    /// Borrow the next value.
    fn view(reader: &mut Reader<'a>) -> Result<Self>;
}

/// A group of destinations decoded in place, in order.
///
/// Implemented for `&mut T` and tuples of destinations, which makes
/// `reader.read_fields((&mut a, &mut b))` the decoding counterpart of
/// `writer.write(&(&a, &b))`.
pub trait DecodeFields {
    /// Decode into each destination, stopping at the first failure.
    fn decode_fields(self, reader: &mut Reader<'_>) -> Result<()>;
}

impl<T: Decode> DecodeFields for &mut T {
    #[inline]
    fn decode_fields(self, reader: &mut Reader<'_>) -> Result<()> {
        self.decode_in_place(reader)
    }
}

impl DecodeFields for () {
    #[inline]
    fn decode_fields(self, _reader: &mut Reader<'_>) -> Result<()> {
        Ok(())
    }
}
