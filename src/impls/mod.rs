mod macros;

mod alloc;
#[cfg(feature = "std")]
mod hash;
mod pod;

pub use pod::Pod;

use core::marker::PhantomData;

use tracing::debug;

use crate::layout::Layout;
use crate::seq::{self, ArchiveLen, Sequence, SequenceMut};
use crate::{Decode, Encode, Error, Reader, Result, View, Writer};

// bool - one byte, 0 or 1
impl Encode for bool {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_u8(u8::from(*self))
    }
}

impl Decode for bool {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match u8::decode(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidData {
                message: "bool must be 0 or 1",
            }),
        }
    }
}

// char - a validated u32
impl Encode for char {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        u32::from(*self).encode(writer)
    }
}

impl Decode for char {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        char::from_u32(u32::decode(reader)?).ok_or(Error::InvalidData {
            message: "invalid char codepoint",
        })
    }
}

// usize/isize - serialize as u64/i64 for portability
impl Encode for usize {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (*self as u64).encode(writer)
    }
}

impl Decode for usize {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        usize::try_from(u64::decode(reader)?).map_err(|_| Error::InvalidData {
            message: "usize out of range for this target",
        })
    }
}

impl Encode for isize {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (*self as i64).encode(writer)
    }
}

impl Decode for isize {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        isize::try_from(i64::decode(reader)?).map_err(|_| Error::InvalidData {
            message: "isize out of range for this target",
        })
    }
}

// Unit type
impl Encode for () {
    const LAYOUT: Layout<Self> = Layout::pod();

    #[inline]
    fn encode(&self, _writer: &mut Writer<'_>) -> Result<()> {
        Ok(())
    }
}

impl Decode for () {
    const LAYOUT: Layout<Self> = Layout::pod();

    #[inline]
    fn decode(_reader: &mut Reader<'_>) -> Result<Self> {
        Ok(())
    }
}

impl<T: ?Sized> Encode for PhantomData<T> {
    // SAFETY: zero-sized.
    const LAYOUT: Layout<Self> = unsafe { Layout::dense() };

    #[inline]
    fn encode(&self, _writer: &mut Writer<'_>) -> Result<()> {
        Ok(())
    }
}

impl<T: ?Sized> Decode for PhantomData<T> {
    // SAFETY: zero-sized.
    const LAYOUT: Layout<Self> = unsafe { Layout::dense() };

    #[inline]
    fn decode(_reader: &mut Reader<'_>) -> Result<Self> {
        Ok(PhantomData)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

// ============================================================================
// Fixed-size arrays and slices
// ============================================================================

impl<T: Encode, const N: usize> Encode for [T; N] {
    const LAYOUT: Layout<Self> = Layout::array(<T as Encode>::LAYOUT);

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        T::encode_slice(self, writer)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    const LAYOUT: Layout<Self> = Layout::array(<T as Decode>::LAYOUT);

    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        T::decode_vec(N, reader)?
            .try_into()
            .map_err(|_| Error::InvalidData {
                message: "array length mismatch",
            })
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        T::decode_slice_in_place(self, reader)
    }
}

impl<T: Encode, const N: usize> Sequence for [T; N] {
    #[inline]
    fn seq_len(&self) -> usize {
        N
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        T::encode_slice(self, writer)
    }
}

impl<T: Decode, const N: usize> SequenceMut for [T; N] {
    #[inline]
    fn current_len(&self) -> usize {
        N
    }

    #[inline]
    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        self.as_mut_slice().decode_items(len, reader)
    }
}

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<T: Encode> Sequence for [T] {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        T::encode_slice(self, writer)
    }
}

impl<T: Decode> SequenceMut for [T] {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        if len > self.len() {
            debug!(len, capacity = self.len(), "declared length exceeds fixed destination");
            return Err(Error::ValueTooLarge {
                len,
                capacity: self.len(),
            });
        }
        T::decode_slice_in_place(&mut self[..len], reader)
    }
}

impl Encode for str {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl Sequence for str {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_bytes(self.as_bytes())
    }
}

// ============================================================================
// Optional and sum types
// ============================================================================

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        match self {
            None => writer.put_u8(0),
            Some(value) => {
                writer.put_u8(1)?;
                value.encode(writer)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        if u8::decode(reader)? == 0 {
            return Ok(None);
        }
        T::decode(reader).map(Some)
    }

    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        if u8::decode(reader)? == 0 {
            *self = None;
            return Ok(());
        }
        match self {
            Some(value) => value.decode_in_place(reader),
            None => {
                *self = Some(T::decode(reader)?);
                Ok(())
            }
        }
    }
}

impl<T: Encode, E: Encode> Encode for core::result::Result<T, E> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        match self {
            Ok(value) => {
                writer.put_u8(0)?;
                value.encode(writer)
            }
            Err(error) => {
                writer.put_u8(1)?;
                error.encode(writer)
            }
        }
    }
}

impl<T: Decode, E: Decode> Decode for core::result::Result<T, E> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match u8::decode(reader)? {
            0 => T::decode(reader).map(Ok),
            1 => E::decode(reader).map(Err),
            tag => Err(Error::InvalidDiscriminant {
                tag,
                alternatives: 2,
            }),
        }
    }
}

// ============================================================================
// Zero-copy views
// ============================================================================

impl<'a> View<'a> for &'a [u8] {
    #[inline]
    fn view(reader: &mut Reader<'a>) -> Result<Self> {
        let len = reader.read_len()?;
        reader.take(len)
    }
}

impl<'a> View<'a> for &'a str {
    #[inline]
    fn view(reader: &mut Reader<'a>) -> Result<Self> {
        let bytes = <&'a [u8]>::view(reader)?;
        core::str::from_utf8(bytes).map_err(|_| Error::InvalidData {
            message: "invalid UTF-8",
        })
    }
}

impl<'a, const N: usize> View<'a> for &'a [u8; N] {
    #[inline]
    fn view(reader: &mut Reader<'a>) -> Result<Self> {
        let bytes = reader.take(N)?;
        bytes.try_into().map_err(|_| Error::InvalidData {
            message: "array length mismatch",
        })
    }
}
