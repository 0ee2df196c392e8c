//! Input archive.

use core::mem::size_of;

use tracing::debug;

use crate::options::{ArchiveOption, ByteOrder, Config, SizePrefix};
use crate::seq::{self, SequenceMut};
use crate::traits::{ArchiveKind, DecodeFields, View};
use crate::{ByteView, Decode, Error, Result};

/// Decodes values out of a byte slice at an advancing cursor.
///
/// Every access is bounds-checked against the slice; a reader never
/// allocates on its own behalf and never reads past the end.
///
/// # Example
///
/// ```
/// use bytearc::Reader;
///
/// let bytes = [4, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0];
/// let mut r = Reader::new(&bytes);
/// let values: Vec<u32> = r.read().unwrap();
/// assert_eq!(values, [1, 2, 3, 4]);
/// assert!(r.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    config: Config,
}

impl<'a> Reader<'a> {
    /// Create a reader at offset zero with default settings.
    #[must_use]
    pub fn new(view: impl Into<ByteView<'a>>) -> Self {
        Self {
            data: view.into().into_slice(),
            pos: 0,
            config: Config::default(),
        }
    }

    /// Create a reader and apply `options` to it.
    #[must_use]
    pub fn with_options(view: impl Into<ByteView<'a>>, options: impl ArchiveOption) -> Self {
        let mut reader = Self::new(view);
        options.apply_reader(&mut reader);
        reader
    }

    /// Always [`ArchiveKind::Input`].
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        ArchiveKind::Input
    }

    /// Decode a fresh value.
    #[inline]
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Decode into an existing value.
    #[inline]
    pub fn read_into<T: Decode>(&mut self, value: &mut T) -> Result<()> {
        value.decode_in_place(self)
    }

    /// Decode into several destinations in order, e.g.
    /// `reader.read_fields((&mut a, &mut b))`.
    ///
    /// Stops at the first failure; later destinations are left untouched.
    #[inline]
    pub fn read_fields<F: DecodeFields>(&mut self, fields: F) -> Result<()> {
        fields.decode_fields(self)
    }

    /// Decode a sequence without a size prefix, using the destination's
    /// current length as the element count.
    #[inline]
    pub fn read_unsized<S: SequenceMut + ?Sized>(&mut self, value: &mut S) -> Result<()> {
        seq::decode_unsized(value, self)
    }

    /// Borrow a value straight out of the underlying bytes.
    #[inline]
    pub fn view<T: View<'a>>(&mut self) -> Result<T> {
        T::view(self)
    }

    /// Borrow the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(Error::OutOfRange {
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Copy the next `N` bytes into an array.
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_exact(&mut out)?;
        Ok(out)
    }

    /// Fill `dst` from the next `dst.len()` bytes.
    #[inline]
    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Read a container length using the archive's [`SizePrefix`].
    pub fn read_len(&mut self) -> Result<usize> {
        match self.config.size_prefix {
            SizePrefix::U8 => seq::decode_len::<seq::U8Len>(self),
            SizePrefix::U16 => seq::decode_len::<seq::U16Len>(self),
            SizePrefix::U32 => seq::decode_len::<seq::U32Len>(self),
            SizePrefix::U64 => seq::decode_len::<seq::U64Len>(self),
            SizePrefix::Varint => seq::decode_len::<seq::VarLen>(self),
        }
    }

    /// Check that `len` values of `T` fit the archive's allocation limit.
    ///
    /// Containers call this after reading a size prefix and before
    /// allocating anything for it. Every element is charged at least one
    /// byte, so zero-sized elements still count against the limit.
    pub fn check_alloc<T>(&self, len: usize) -> Result<()> {
        let Some(limit) = self.config.limit else {
            return Ok(());
        };
        let requested = len.saturating_mul(size_of::<T>().max(1));
        if requested > limit {
            debug!(len, requested, limit, "declared length exceeds allocation limit");
            return Err(Error::AllocLimit { requested, limit });
        }
        Ok(())
    }

    /// Cursor offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, clamped to the end of the data.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Bytes left to read.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been read.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying slice.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Resolved byte order.
    #[inline]
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    /// Default size prefix.
    #[inline]
    #[must_use]
    pub const fn size_prefix(&self) -> SizePrefix {
        self.config.size_prefix
    }

    /// Allocation limit in bytes, if any.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.config.limit
    }

    /// Resolved settings.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
