//! Byte-layout classification.
//!
//! A type is *dense* when its in-memory bytes are exactly its encoding on a
//! host whose byte order matches the archive's: no padding, declaration-order
//! fields, and every bit pattern a valid value. Dense values are encoded and
//! decoded with one copy instead of per-field recursion.
//!
//! Density is computed from type information alone, as an associated const on
//! [`Encode`] and [`Decode`]. A dense [`Layout`] can only be produced through
//! [`Layout::pod`], which zerocopy's traits prove sound, or through the unsafe
//! constructors, which the derive macros use for `#[repr(C)]` aggregates.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{MaybeUninit, size_of, size_of_val};

use crate::{Decode, Encode, Reader, Result, Writer};

/// Static layout classification of `T`.
///
/// The type parameter ties a classification to the type it describes, so a
/// dense layout proven for one type cannot be claimed by another.
pub struct Layout<T: ?Sized> {
    dense: bool,
    size: usize,
    _marker: PhantomData<fn() -> *const T>,
}

/// Type-erased [`Layout`] of one field, as consumed by
/// [`Layout::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldLayout {
    dense: bool,
    size: usize,
}

impl<T: ?Sized> Clone for Layout<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Layout<T> {}

impl<T: ?Sized> fmt::Debug for Layout<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("dense", &self.dense)
            .field("size", &self.size)
            .finish()
    }
}

impl<T: ?Sized> Layout<T> {
    /// Not bulk-copyable; encoded member-wise.
    pub const OPAQUE: Self = Self::new(false, 0);

    const fn new(dense: bool, size: usize) -> Self {
        Self {
            dense,
            size,
            _marker: PhantomData,
        }
    }

    /// Whether values can be copied as raw bytes.
    #[inline]
    #[must_use]
    pub const fn is_dense(&self) -> bool {
        self.dense
    }

    /// Encoded size of a dense value; zero for opaque layouts.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Erase the type for use in [`Layout::aggregate`].
    #[inline]
    #[must_use]
    pub const fn field(&self) -> FieldLayout {
        FieldLayout {
            dense: self.dense,
            size: self.size,
        }
    }
}

impl<T> Layout<T> {
    /// Dense layout of a type zerocopy proves padding-free and valid for
    /// every bit pattern.
    #[must_use]
    pub const fn pod() -> Self
    where
        T: zerocopy::FromBytes + zerocopy::IntoBytes + zerocopy::Immutable,
    {
        Self::new(true, size_of::<T>())
    }

    /// Dense layout of `T`.
    ///
    /// # Safety
    ///
    /// `T` must contain no padding bytes and every bit pattern of
    /// `size_of::<T>()` bytes must be a valid `T`.
    #[must_use]
    pub const unsafe fn dense() -> Self {
        Self::new(true, size_of::<T>())
    }

    /// Layout of an aggregate from its fields' layouts.
    ///
    /// Dense iff every field is dense and the field sizes add up to
    /// `size_of::<T>()`, which rules out interior and trailing padding.
    ///
    /// # Safety
    ///
    /// `fields` must hold the layouts of all of `T`'s fields in declaration
    /// order, and `T` must lay them out in that order (`#[repr(C)]` or
    /// `#[repr(transparent)]`).
    #[must_use]
    pub const unsafe fn aggregate(fields: &[FieldLayout]) -> Self {
        let mut total = 0usize;
        let mut i = 0;
        while i < fields.len() {
            if !fields[i].dense {
                return Self::OPAQUE;
            }
            total += fields[i].size;
            i += 1;
        }
        if total == size_of::<T>() {
            Self::new(true, total)
        } else {
            Self::OPAQUE
        }
    }
}

impl<T, const N: usize> Layout<[T; N]> {
    /// Layout of an array given its element's layout.
    #[must_use]
    pub const fn array(element: Layout<T>) -> Self {
        if element.dense {
            Self::new(true, element.size * N)
        } else {
            Self::OPAQUE
        }
    }
}

/// Encode `value` with one copy if `T` is dense and the byte order allows.
///
/// Returns `None` when the member-wise path must be taken instead.
#[inline]
pub fn encode_dense<T: Encode>(value: &T, writer: &mut Writer<'_>) -> Option<Result<()>> {
    if !(T::LAYOUT.is_dense() && writer.byte_order().is_native()) {
        return None;
    }
    // SAFETY: `T` is dense, so all of its bytes are initialized.
    Some(writer.put_bytes(unsafe { slice_bytes(core::slice::from_ref(value)) }))
}

/// Decode a fresh `T` with one copy if `T` is dense and the byte order allows.
#[inline]
pub fn decode_dense<T: Decode>(reader: &mut Reader<'_>) -> Option<Result<T>> {
    if !(T::LAYOUT.is_dense() && reader.byte_order().is_native()) {
        return None;
    }
    let mut value = MaybeUninit::<T>::zeroed();
    // SAFETY: the zeroed storage is initialized and spans `size_of::<T>()`
    // bytes.
    let bytes = unsafe {
        core::slice::from_raw_parts_mut(value.as_mut_ptr().cast::<u8>(), size_of::<T>())
    };
    // SAFETY: `T` accepts any bit pattern, so the storage holds a valid `T`
    // whatever the copy left behind.
    Some(reader.read_exact(bytes).map(|()| unsafe { value.assume_init() }))
}

/// Decode into `value` with one copy if `T` is dense and the byte order allows.
#[inline]
pub fn decode_dense_in_place<T: Decode>(
    value: &mut T,
    reader: &mut Reader<'_>,
) -> Option<Result<()>> {
    if !(T::LAYOUT.is_dense() && reader.byte_order().is_native()) {
        return None;
    }
    // SAFETY: `T` is dense.
    Some(reader.read_exact(unsafe { slice_bytes_mut(core::slice::from_mut(value)) }))
}

/// Read `len` dense values with one copy.
pub(crate) fn read_dense_vec<T: Decode>(len: usize, reader: &mut Reader<'_>) -> Result<Vec<T>> {
    debug_assert!(T::LAYOUT.is_dense());
    let Some(total) = len.checked_mul(size_of::<T>()) else {
        return Err(crate::Error::OutOfRange {
            needed: usize::MAX,
            available: reader.remaining(),
        });
    };
    // Checked before allocating so a bogus length cannot force a large
    // allocation.
    let bytes = reader.take(total)?;
    let mut items = Vec::<T>::with_capacity(len);
    // SAFETY: the capacity holds `total` bytes, the source does not overlap a
    // fresh allocation, and every bit pattern is a valid `T`.
    unsafe {
        core::ptr::copy_nonoverlapping(bytes.as_ptr(), items.as_mut_ptr().cast::<u8>(), total);
        items.set_len(len);
    }
    Ok(items)
}

/// View a run of values as raw bytes.
///
/// # Safety
///
/// `T` must contain no padding bytes.
#[inline]
pub(crate) unsafe fn slice_bytes<T>(items: &[T]) -> &[u8] {
    // SAFETY: upheld by the caller; the length covers exactly `items`.
    unsafe { core::slice::from_raw_parts(items.as_ptr().cast::<u8>(), size_of_val(items)) }
}

/// View a run of values as mutable raw bytes.
///
/// # Safety
///
/// `T` must contain no padding bytes and accept every bit pattern.
#[inline]
pub(crate) unsafe fn slice_bytes_mut<T>(items: &mut [T]) -> &mut [u8] {
    // SAFETY: upheld by the caller; the length covers exactly `items`.
    unsafe { core::slice::from_raw_parts_mut(items.as_mut_ptr().cast::<u8>(), size_of_val(items)) }
}
