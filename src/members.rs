//! Field lists of aggregates.
//!
//! The derives discover an aggregate's fields on their own. [`members!`]
//! is the explicit alternative: it lists the fields by hand and, when invoked
//! in the type's defining module, reaches fields that are private to it.
//! Invoking it is the grant; nothing outside that module gains access.
//!
//! ```
//! mod account {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Account {
//!         id: u64,
//!         owner: String,
//!     }
//!
//!     impl Account {
//!         pub fn new(id: u64, owner: &str) -> Self {
//!             Self { id, owner: owner.into() }
//!         }
//!     }
//!
//!     bytearc::members! {
//!         Account { id: u64, owner: String }
//!     }
//! }
//!
//! use account::Account;
//!
//! let bytes = bytearc::to_vec(&Account::new(7, "ann")).unwrap();
//! assert_eq!(bytes.len(), 8 + 4 + 3);
//! let back: Account = bytearc::from_slice(&bytes).unwrap();
//! assert_eq!(back, Account::new(7, "ann"));
//! ```
//!
//! [`members!`]: crate::members!

use crate::traits::DecodeFields;
use crate::{Encode, Reader, Result, Writer};

/// Ceiling on the number of fields an aggregate may expose.
///
/// Exceeding it is a compile-time error. The derives accept
/// `#[archive(max_members = N)]` to raise it for a single type.
pub const MAX_MEMBERS: usize = 50;

/// An aggregate's ordered field list.
///
/// Field references are returned as nested pairs ending in `()`, e.g.
/// `(&a, (&b, ()))`, which encode exactly like the fields in sequence.
pub trait Members {
    /// Number of fields.
    const COUNT: usize;

    /// Shared references to every field, in declaration order.
    type Refs<'a>: Encode
    where
        Self: 'a;

    /// Mutable references to every field, in declaration order.
    type Muts<'a>: DecodeFields
    where
        Self: 'a;

    /// Borrow every field.
    fn members(&self) -> Self::Refs<'_>;

    /// Borrow every field mutably.
    fn members_mut(&mut self) -> Self::Muts<'_>;
}

/// Encode each field of `value` in order.
#[inline]
pub fn encode_members<T: Members + ?Sized>(value: &T, writer: &mut Writer<'_>) -> Result<()> {
    value.members().encode(writer)
}

/// Decode into each field of `value` in order, stopping at the first
/// failure.
#[inline]
pub fn decode_members_in_place<T: Members + ?Sized>(
    value: &mut T,
    reader: &mut Reader<'_>,
) -> Result<()> {
    value.members_mut().decode_fields(reader)
}

/// Implement [`Members`], [`Encode`] and [`Decode`](crate::Decode) for a
/// struct from an explicit field list.
///
/// Fields are encoded in the order listed. Decoding a fresh value starts
/// from `Default::default()`, so the type must implement [`Default`].
#[macro_export]
macro_rules! members {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => {
        1usize + $crate::members!(@count $($tail)*)
    };

    (@refs $lt:lifetime;) => { () };
    (@refs $lt:lifetime; $head:ty $(, $tail:ty)*) => {
        (&$lt $head, $crate::members!(@refs $lt; $($tail),*))
    };

    (@muts $lt:lifetime;) => { () };
    (@muts $lt:lifetime; $head:ty $(, $tail:ty)*) => {
        (&$lt mut $head, $crate::members!(@muts $lt; $($tail),*))
    };

    (@borrow $this:ident;) => { () };
    (@borrow $this:ident; $head:ident $(, $tail:ident)*) => {
        (&$this.$head, $crate::members!(@borrow $this; $($tail),*))
    };

    (@borrow_mut $this:ident;) => { () };
    (@borrow_mut $this:ident; $head:ident $(, $tail:ident)*) => {
        (&mut $this.$head, $crate::members!(@borrow_mut $this; $($tail),*))
    };

    ($ty:ty { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::members::Members for $ty {
            const COUNT: usize = $crate::members!(@count $($field)*);

            type Refs<'a> = $crate::members!(@refs 'a; $($fty),*) where Self: 'a;
            type Muts<'a> = $crate::members!(@muts 'a; $($fty),*) where Self: 'a;

            #[inline]
            fn members(&self) -> Self::Refs<'_> {
                $crate::members!(@borrow self; $($field),*)
            }

            #[inline]
            fn members_mut(&mut self) -> Self::Muts<'_> {
                $crate::members!(@borrow_mut self; $($field),*)
            }
        }

        const _: () = assert!(
            <$ty as $crate::members::Members>::COUNT <= $crate::members::MAX_MEMBERS,
            "too many members for bytearc::members!",
        );

        impl $crate::Encode for $ty {
            #[inline]
            fn encode(&self, writer: &mut $crate::Writer<'_>) -> $crate::Result<()> {
                $crate::members::encode_members(self, writer)
            }
        }

        impl $crate::Decode for $ty {
            #[inline]
            fn decode(reader: &mut $crate::Reader<'_>) -> $crate::Result<Self> {
                let mut value = <$ty as ::core::default::Default>::default();
                $crate::members::decode_members_in_place(&mut value, reader)?;
                ::core::result::Result::Ok(value)
            }

            #[inline]
            fn decode_in_place(&mut self, reader: &mut $crate::Reader<'_>) -> $crate::Result<()> {
                $crate::members::decode_members_in_place(self, reader)
            }
        }
    };
}
