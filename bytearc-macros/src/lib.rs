//! Derive macros for bytearc.

use proc_macro::TokenStream;
mod archive;

/// Derive `Encode`.
///
/// Structs encode their fields in declaration order; enums encode a one-byte
/// variant index followed by the variant's fields. Field attributes:
///
/// - `#[archive(skip)]`: not encoded; decoded as `Default::default()`.
/// - `#[archive(size = u8 | u16 | u32 | u64 | varint)]`: length prefix
///   width for a container field.
/// - `#[archive(unsized)]`: no length prefix; decoding uses the field's
///   current length.
///
/// Container attributes:
///
/// - `#[archive(members = N)]`: assert that the struct has `N` fields.
/// - `#[archive(max_members = N)]`: raise the field-count ceiling.
///
/// `#[repr(C)]` and `#[repr(transparent)]` structs without padding and with
/// only dense fields are encoded with a single copy.
#[proc_macro_derive(Encode, attributes(archive))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    archive::derive_encode(input)
}

/// Derive `Decode`. Accepts the same attributes as `Encode`.
#[proc_macro_derive(Decode, attributes(archive))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    archive::derive_decode(input)
}
