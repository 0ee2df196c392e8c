//! Backing storage for archives.

use alloc::vec::Vec;

/// One of the three storage shapes an archive can wrap.
///
/// A fixed view's address and length never change for its lifetime; only a
/// growable view is ever resized, and only by a writer.
#[derive(Debug)]
pub enum ByteView<'a> {
    /// Fixed-capacity mutable window. Overflow is an error.
    Fixed(&'a mut [u8]),
    /// Fixed-capacity read-only window.
    ReadOnly(&'a [u8]),
    /// Caller-owned growable buffer. Its length is the readable horizon.
    Growable(&'a mut Vec<u8>),
}

impl<'a> ByteView<'a> {
    /// Current length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the view holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether writes past the end grow the view.
    #[inline]
    #[must_use]
    pub fn is_growable(&self) -> bool {
        matches!(self, Self::Growable(_))
    }

    /// All bytes currently in the view.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Fixed(buf) => &buf[..],
            Self::ReadOnly(buf) => &buf[..],
            Self::Growable(buf) => buf.as_slice(),
        }
    }

    /// Mutable access, or `None` for a read-only view.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            Self::Fixed(buf) => Some(&mut buf[..]),
            Self::ReadOnly(_) => None,
            Self::Growable(buf) => Some(buf.as_mut_slice()),
        }
    }

    /// Give up mutability, keeping the full borrow.
    #[inline]
    #[must_use]
    pub fn into_slice(self) -> &'a [u8] {
        match self {
            Self::Fixed(buf) => &*buf,
            Self::ReadOnly(buf) => buf,
            Self::Growable(buf) => buf.as_slice(),
        }
    }

    /// Reserve capacity without changing the length. No-op on fixed views.
    pub fn reserve(&mut self, additional: usize) {
        if let Self::Growable(buf) = self {
            buf.reserve(additional);
        }
    }

    /// Set the length, zero-filling new bytes. Returns `false` (and does
    /// nothing) on fixed views.
    pub fn resize(&mut self, len: usize) -> bool {
        match self {
            Self::Growable(buf) => {
                buf.resize(len, 0);
                true
            }
            Self::Fixed(_) | Self::ReadOnly(_) => false,
        }
    }

    /// Drop every byte at or past `len`. No-op on fixed views.
    pub(crate) fn truncate(&mut self, len: usize) {
        if let Self::Growable(buf) = self {
            buf.truncate(len);
        }
    }
}

impl<'a> From<&'a mut Vec<u8>> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a mut Vec<u8>) -> Self {
        Self::Growable(buf)
    }
}

impl<'a> From<&'a Vec<u8>> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a Vec<u8>) -> Self {
        Self::ReadOnly(buf)
    }
}

impl<'a> From<&'a mut [u8]> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a mut [u8]) -> Self {
        Self::Fixed(buf)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a [u8]) -> Self {
        Self::ReadOnly(buf)
    }
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a mut [u8; N]) -> Self {
        Self::Fixed(buf)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteView<'a> {
    #[inline]
    fn from(buf: &'a [u8; N]) -> Self {
        Self::ReadOnly(buf)
    }
}
