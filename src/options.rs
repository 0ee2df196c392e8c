//! Archive configuration applied once at construction.
//!
//! Options are plain values implementing [`ArchiveOption`]. Tuples of options
//! apply left to right, so `((a, b), c)` and `(a, (b, c))` configure an
//! archive identically. An option that has no meaning for an archive kind is
//! a no-op there: [`Append`], [`Reserve`] and [`Resize`] only touch growable
//! writers.
//!
//! ```
//! use bytearc::{Append, ByteOrder, Reserve, SizePrefix, Writer};
//!
//! let mut buf: Vec<u8> = vec![0xAA];
//! let options = (Append, Reserve(64), ByteOrder::Big, SizePrefix::U8);
//! let mut w = Writer::with_options(&mut buf, options);
//! w.write(&vec![1u16, 2]).unwrap();
//! assert_eq!(buf, [0xAA, 2, 0, 1, 0, 2]);
//! ```

use crate::{Reader, Writer};

/// Byte order applied to every primitive in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
    /// The host's order.
    Native,
    /// The opposite of the host's order.
    Swapped,
}

impl ByteOrder {
    /// Resolve to [`Little`](Self::Little) or [`Big`](Self::Big).
    #[must_use]
    pub const fn resolve(self) -> Self {
        let native_little = cfg!(target_endian = "little");
        match self {
            Self::Little => Self::Little,
            Self::Big => Self::Big,
            Self::Native if native_little => Self::Little,
            Self::Native => Self::Big,
            Self::Swapped if native_little => Self::Big,
            Self::Swapped => Self::Little,
        }
    }

    /// Whether this order matches the host's in-memory layout.
    ///
    /// Bulk copies are only taken when this holds.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(
            (self.resolve(), cfg!(target_endian = "little")),
            (Self::Little, true) | (Self::Big, false)
        )
    }
}

/// Width of the element count written before dynamic containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizePrefix {
    /// One byte.
    U8,
    /// Two bytes.
    U16,
    /// Four bytes.
    #[default]
    U32,
    /// Eight bytes.
    U64,
    /// LEB128 variable-length integer.
    Varint,
}

/// Upper bound, in bytes, on the allocation a single decoded length may imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocLimit(pub usize);

/// Start writing at the current end of a growable buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Append;

/// Reserve capacity in a growable buffer without changing its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reserve(pub usize);

/// Set the length of a growable buffer, clamping the cursor to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resize(pub usize);

/// Resolved per-archive settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Config {
    pub(crate) byte_order: ByteOrder,
    pub(crate) size_prefix: SizePrefix,
    pub(crate) limit: Option<usize>,
}

impl Config {
    /// Byte order, always resolved to little or big.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Default size prefix for dynamic containers.
    #[must_use]
    pub const fn size_prefix(&self) -> SizePrefix {
        self.size_prefix
    }

    /// Allocation limit in bytes, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// A setting applied to an archive at construction.
pub trait ArchiveOption {
    /// Apply to a writer.
    #[inline]
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        let _ = writer;
    }

    /// Apply to a reader.
    #[inline]
    fn apply_reader(&self, reader: &mut Reader<'_>) {
        let _ = reader;
    }
}

impl ArchiveOption for () {}

impl<T: ArchiveOption + ?Sized> ArchiveOption for &T {
    #[inline]
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        (**self).apply_writer(writer);
    }

    #[inline]
    fn apply_reader(&self, reader: &mut Reader<'_>) {
        (**self).apply_reader(reader);
    }
}

impl ArchiveOption for ByteOrder {
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        writer.config_mut().byte_order = self.resolve();
    }

    fn apply_reader(&self, reader: &mut Reader<'_>) {
        reader.config_mut().byte_order = self.resolve();
    }
}

impl ArchiveOption for SizePrefix {
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        writer.config_mut().size_prefix = *self;
    }

    fn apply_reader(&self, reader: &mut Reader<'_>) {
        reader.config_mut().size_prefix = *self;
    }
}

impl ArchiveOption for AllocLimit {
    fn apply_reader(&self, reader: &mut Reader<'_>) {
        reader.config_mut().limit = Some(self.0);
    }
}

impl ArchiveOption for Append {
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        if writer.view().is_growable() {
            let end = writer.view().len();
            writer.reset(end);
        }
    }
}

impl ArchiveOption for Reserve {
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        writer.view_mut().reserve(self.0);
    }
}

impl ArchiveOption for Resize {
    fn apply_writer(&self, writer: &mut Writer<'_>) {
        if writer.view_mut().resize(self.0) {
            let pos = writer.position();
            writer.reset(pos);
        }
    }
}

macro_rules! impl_option_tuple {
    ($($name:ident),+) => {
        impl<$($name: ArchiveOption),+> ArchiveOption for ($($name,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn apply_writer(&self, writer: &mut Writer<'_>) {
                let ($($name,)+) = self;
                $($name.apply_writer(writer);)+
            }

            #[inline]
            #[allow(non_snake_case)]
            fn apply_reader(&self, reader: &mut Reader<'_>) {
                let ($($name,)+) = self;
                $($name.apply_reader(reader);)+
            }
        }
    };
}

impl_option_tuple!(A);
impl_option_tuple!(A, B);
impl_option_tuple!(A, B, C);
impl_option_tuple!(A, B, C, D);
impl_option_tuple!(A, B, C, D, E);
impl_option_tuple!(A, B, C, D, E, F);
impl_option_tuple!(A, B, C, D, E, F, G);
impl_option_tuple!(A, B, C, D, E, F, G, H);
