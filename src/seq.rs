//! Size-prefix conventions for dynamic containers.
//!
//! A container is written as a length followed by its elements. The length
//! codec is chosen per archive ([`SizePrefix`](crate::SizePrefix), via
//! [`ArchiveLen`]), per value ([`Prefixed`]) or per derived field
//! (`#[archive(size = u8)]`), or suppressed with [`Unsized`].
//!
//! ```
//! use bytearc::seq::{Prefixed, U8Len, Unsized};
//! use bytearc::{Reader, Writer};
//!
//! let mut buf: Vec<u8> = Vec::new();
//! let mut w = Writer::new(&mut buf);
//! w.write(&Prefixed::<_, U8Len>::new(vec![7u8, 8])).unwrap();
//! w.write(&Unsized(vec![9u8])).unwrap();
//! assert_eq!(buf, [2, 7, 8, 9]);
//!
//! let mut head: Vec<u8> = Vec::new();
//! let mut tail = vec![0u8; 1];
//! let mut r = Reader::new(&buf);
//! r.read_fields((Prefixed::<_, U8Len>::new(&mut head), Unsized(&mut tail))).unwrap();
//! assert_eq!((head, tail), (vec![7, 8], vec![9]));
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::traits::DecodeFields;
use crate::{Decode, Encode, Error, Reader, Result, Writer, varint};

/// A container whose elements can be encoded after a length.
pub trait Sequence {
    /// Number of elements the length prefix announces.
    fn seq_len(&self) -> usize;

    /// Encode the elements, without a length.
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()>;
}

/// A container that can be refilled from a known number of elements.
pub trait SequenceMut {
    /// Current number of elements; the count used when no prefix is present.
    fn current_len(&self) -> usize;

    /// Replace the contents with `len` decoded elements.
    ///
    /// Growable containers resize; fixed-capacity ones fail with
    /// [`Error::ValueTooLarge`] when `len` exceeds their capacity.
    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()>;
}

impl<S: Sequence + ?Sized> Sequence for &S {
    #[inline]
    fn seq_len(&self) -> usize {
        (**self).seq_len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode_items(writer)
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    #[inline]
    fn seq_len(&self) -> usize {
        (**self).seq_len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode_items(writer)
    }
}

impl<S: SequenceMut + ?Sized> SequenceMut for &mut S {
    #[inline]
    fn current_len(&self) -> usize {
        (**self).current_len()
    }

    #[inline]
    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        (**self).decode_items(len, reader)
    }
}

// ============================================================================
// Length codecs
// ============================================================================

/// Encoding of a container length.
pub trait LenCodec {
    /// Write `len`.
    ///
    /// Fails with [`Error::InvalidArgument`] if `len` does not fit.
    fn encode_len(len: usize, writer: &mut Writer<'_>) -> Result<()>;

    /// Read a length.
    fn decode_len(reader: &mut Reader<'_>) -> Result<usize>;
}

/// Whatever [`SizePrefix`](crate::SizePrefix) the archive is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArchiveLen;

impl LenCodec for ArchiveLen {
    #[inline]
    fn encode_len(len: usize, writer: &mut Writer<'_>) -> Result<()> {
        writer.write_len(len)
    }

    #[inline]
    fn decode_len(reader: &mut Reader<'_>) -> Result<usize> {
        reader.read_len()
    }
}

macro_rules! fixed_len {
    ($($(#[$meta:meta])* $name:ident => $ty:ty),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl LenCodec for $name {
                #[inline]
                fn encode_len(len: usize, writer: &mut Writer<'_>) -> Result<()> {
                    let Ok(len) = <$ty>::try_from(len) else {
                        return Err(Error::InvalidArgument {
                            message: concat!("length does not fit a ", stringify!($ty), " size prefix"),
                        });
                    };
                    len.encode(writer)
                }

                #[inline]
                fn decode_len(reader: &mut Reader<'_>) -> Result<usize> {
                    let len = <$ty>::decode(reader)?;
                    usize::try_from(len).map_err(|_| Error::InvalidData {
                        message: "length prefix exceeds usize",
                    })
                }
            }
        )+
    };
}

fixed_len! {
    /// One-byte length.
    U8Len => u8,
    /// Two-byte length.
    U16Len => u16,
    /// Four-byte length.
    U32Len => u32,
    /// Eight-byte length.
    U64Len => u64,
}

/// LEB128 length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarLen;

impl LenCodec for VarLen {
    #[inline]
    fn encode_len(len: usize, writer: &mut Writer<'_>) -> Result<()> {
        varint::encode(len as u64, writer)
    }

    #[inline]
    fn decode_len(reader: &mut Reader<'_>) -> Result<usize> {
        usize::try_from(varint::decode(reader)?).map_err(|_| Error::InvalidData {
            message: "length prefix exceeds usize",
        })
    }
}

/// Write `len` with codec `L`.
#[inline]
pub fn encode_len<L: LenCodec>(len: usize, writer: &mut Writer<'_>) -> Result<()> {
    L::encode_len(len, writer)
}

/// Read a length with codec `L`.
#[inline]
pub fn decode_len<L: LenCodec>(reader: &mut Reader<'_>) -> Result<usize> {
    L::decode_len(reader)
}

// ============================================================================
// Prefixed and unsized encoding
// ============================================================================

/// Encode `value`'s length with `L`, then its elements.
#[inline]
pub fn encode_prefixed<S, L>(value: &S, writer: &mut Writer<'_>) -> Result<()>
where
    S: Sequence + ?Sized,
    L: LenCodec,
{
    L::encode_len(value.seq_len(), writer)?;
    value.encode_items(writer)
}

/// Decode a fresh container whose length was written with `L`.
#[inline]
pub fn decode_prefixed<S, L>(reader: &mut Reader<'_>) -> Result<S>
where
    S: SequenceMut + Default,
    L: LenCodec,
{
    let mut value = S::default();
    decode_prefixed_in_place::<S, L>(&mut value, reader)?;
    Ok(value)
}

/// Refill `value` from a length written with `L` and that many elements.
#[inline]
pub fn decode_prefixed_in_place<S, L>(value: &mut S, reader: &mut Reader<'_>) -> Result<()>
where
    S: SequenceMut + ?Sized,
    L: LenCodec,
{
    let len = L::decode_len(reader)?;
    value.decode_items(len, reader)
}

/// Encode `value`'s elements without a length.
#[inline]
pub fn encode_unsized<S: Sequence + ?Sized>(value: &S, writer: &mut Writer<'_>) -> Result<()> {
    value.encode_items(writer)
}

/// Decode as many elements as `value` currently holds.
#[inline]
pub fn decode_unsized<S: SequenceMut + ?Sized>(
    value: &mut S,
    reader: &mut Reader<'_>,
) -> Result<()> {
    let len = value.current_len();
    value.decode_items(len, reader)
}

/// Encodes a container without its length prefix.
///
/// Decoding reuses the destination's current length, so an unsized
/// destination must already hold as many elements as were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unsized<S>(pub S);

impl<S: Sequence> Encode for Unsized<S> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        encode_unsized(&self.0, writer)
    }
}

impl<S: SequenceMut + Default> Decode for Unsized<S> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let mut value = S::default();
        decode_unsized(&mut value, reader)?;
        Ok(Self(value))
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        decode_unsized(&mut self.0, reader)
    }
}

impl<S: SequenceMut + ?Sized> DecodeFields for Unsized<&mut S> {
    #[inline]
    fn decode_fields(self, reader: &mut Reader<'_>) -> Result<()> {
        decode_unsized(self.0, reader)
    }
}

/// Encodes a container with length codec `L` instead of the archive's.
pub struct Prefixed<S, L = ArchiveLen> {
    /// The wrapped container.
    pub value: S,
    _len: PhantomData<fn() -> L>,
}

impl<S, L> Prefixed<S, L> {
    /// Wrap `value`.
    #[inline]
    pub const fn new(value: S) -> Self {
        Self {
            value,
            _len: PhantomData,
        }
    }

    /// Unwrap the container.
    #[inline]
    pub fn into_inner(self) -> S {
        self.value
    }
}

impl<S: fmt::Debug, L> fmt::Debug for Prefixed<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prefixed").field(&self.value).finish()
    }
}

impl<S: Default, L> Default for Prefixed<S, L> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: PartialEq, L> PartialEq for Prefixed<S, L> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<S: Sequence, L: LenCodec> Encode for Prefixed<S, L> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        encode_prefixed::<S, L>(&self.value, writer)
    }
}

impl<S: SequenceMut + Default, L: LenCodec> Decode for Prefixed<S, L> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        decode_prefixed::<S, L>(reader).map(Self::new)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        decode_prefixed_in_place::<S, L>(&mut self.value, reader)
    }
}

impl<S: SequenceMut + ?Sized, L: LenCodec> DecodeFields for Prefixed<&mut S, L> {
    #[inline]
    fn decode_fields(self, reader: &mut Reader<'_>) -> Result<()> {
        decode_prefixed_in_place::<S, L>(self.value, reader)
    }
}
