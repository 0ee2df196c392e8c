//! Output archive.

use tracing::trace;

use crate::options::{ArchiveOption, ByteOrder, Config, SizePrefix};
use crate::seq::{self, Sequence};
use crate::traits::ArchiveKind;
use crate::{ByteView, Encode, Error, Result};

/// Encodes values into a [`ByteView`] at an advancing cursor.
///
/// Over growable storage the buffer grows geometrically on overflow and is
/// trimmed to the cursor after every [`write`](Self::write). Over fixed
/// storage an overflow fails with [`Error::OutOfRange`] and nothing is
/// resized.
///
/// # Example
///
/// ```
/// use bytearc::Writer;
///
/// let mut buf: Vec<u8> = Vec::new();
/// let mut w = Writer::new(&mut buf);
/// w.write(&vec![1u32, 2, 3, 4]).unwrap();
/// assert_eq!(w.position(), 20);
/// assert_eq!(buf[..4], [4, 0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct Writer<'a> {
    view: ByteView<'a>,
    pos: usize,
    config: Config,
}

impl<'a> Writer<'a> {
    /// Create a writer at offset zero with default settings.
    #[must_use]
    pub fn new(view: impl Into<ByteView<'a>>) -> Self {
        Self {
            view: view.into(),
            pos: 0,
            config: Config::default(),
        }
    }

    /// Create a writer and apply `options` to it.
    #[must_use]
    pub fn with_options(view: impl Into<ByteView<'a>>, options: impl ArchiveOption) -> Self {
        let mut writer = Self::new(view);
        options.apply_writer(&mut writer);
        writer
    }

    /// Always [`ArchiveKind::Output`].
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        ArchiveKind::Output
    }

    /// Encode `value` as one top-level call.
    ///
    /// Multiple values are written as a tuple of references,
    /// `writer.write(&(&a, &b))`, which stops at the first failure. Whatever
    /// the outcome, a growable buffer is trimmed to the cursor afterwards.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let result = value.encode(self);
        self.view.truncate(self.pos);
        result
    }

    /// Encode a sequence's elements without a size prefix.
    pub fn write_unsized<S: Sequence + ?Sized>(&mut self, value: &S) -> Result<()> {
        let result = seq::encode_unsized(value, self);
        self.view.truncate(self.pos);
        result
    }

    /// Copy raw bytes at the cursor.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.reserve_for(bytes.len())?;
        let Some(dst) = self.view.as_mut_slice() else {
            return Err(Error::ReadOnly);
        };
        dst[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Write a single byte at the cursor.
    #[inline]
    pub fn put_u8(&mut self, byte: u8) -> Result<()> {
        self.put_bytes(&[byte])
    }

    /// Write a container length using the archive's [`SizePrefix`].
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        match self.config.size_prefix {
            SizePrefix::U8 => seq::encode_len::<seq::U8Len>(len, self),
            SizePrefix::U16 => seq::encode_len::<seq::U16Len>(len, self),
            SizePrefix::U32 => seq::encode_len::<seq::U32Len>(len, self),
            SizePrefix::U64 => seq::encode_len::<seq::U64Len>(len, self),
            SizePrefix::Varint => seq::encode_len::<seq::VarLen>(len, self),
        }
    }

    /// Cursor offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, clamped to the view's length. Nothing is reallocated.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.view.len());
    }

    /// Bytes between the cursor and the end of the view.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.view.len() - self.pos
    }

    /// Bytes before the cursor.
    #[inline]
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.view.as_slice()[..self.pos]
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

    /// Resolved settings.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The wrapped storage.
    #[inline]
    #[must_use]
    pub const fn view(&self) -> &ByteView<'a> {
        &self.view
    }

    /// Release the wrapped storage.
    #[must_use]
    pub fn into_view(self) -> ByteView<'a> {
        self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut ByteView<'a> {
        &mut self.view
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Make room for `additional` bytes at the cursor and return the end
    /// offset of the write.
    fn reserve_for(&mut self, additional: usize) -> Result<usize> {
        let len = self.view.len();
        let end = self.pos.checked_add(additional).ok_or(Error::OutOfRange {
            needed: usize::MAX,
            available: len - self.pos,
        })?;
        if end <= len {
            return Ok(end);
        }
        match &mut self.view {
            ByteView::Growable(buf) => {
                let new_len = len
                    .checked_add(additional)
                    .and_then(|n| n.checked_mul(3))
                    .map(|n| n / 2)
                    .ok_or(Error::OutOfRange {
                        needed: end,
                        available: len,
                    })?;
                trace!(from = len, to = new_len, "growing output buffer");
                buf.resize(new_len, 0);
                Ok(end)
            }
            ByteView::Fixed(_) => Err(Error::OutOfRange {
                needed: additional,
                available: len - self.pos,
            }),
            ByteView::ReadOnly(_) => Err(Error::ReadOnly),
        }
    }
}
