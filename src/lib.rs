//! Binary object archives.
//!
//! A [`Writer`] encodes values into bytes and a [`Reader`] decodes them back,
//! with no schema beyond the Rust types themselves. Every shape has a fixed
//! encoding:
//!
//! - numbers are written in the archive's [`ByteOrder`];
//! - dynamic containers carry a length prefix ([`SizePrefix`], 4 bytes by
//!   default) and fixed arrays and tuples carry none;
//! - `Option` and sum types carry a one-byte tag;
//! - aggregates are their fields in declaration order.
//!
//! Types whose memory is exactly their encoding are copied in one piece
//! (see [`layout`]).
//!
//! # Example
//!
//! ```
//! use bytearc::{Decode, Encode, Reader, Writer};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Node {
//!     value: u32,
//!     children: Vec<Node>,
//! }
//!
//! let tree = Node {
//!     value: 1,
//!     children: vec![Node { value: 2, children: vec![] }],
//! };
//!
//! let mut buf: Vec<u8> = Vec::new();
//! Writer::new(&mut buf).write(&tree).unwrap();
//! assert_eq!(buf.len(), 4 + 4 + 4 + 4);
//!
//! let back: Node = Reader::new(&buf).read().unwrap();
//! assert_eq!(back, tree);
//! ```
//!
//! Several values at once:
//!
//! ```
//! use bytearc::{Reader, Writer};
//!
//! let mut buf: Vec<u8> = Vec::new();
//! Writer::new(&mut buf).write(&(&7u8, &"hi", &Some(1u16))).unwrap();
//!
//! let (mut a, mut b, mut c) = (0u8, String::new(), None::<u16>);
//! Reader::new(&buf).read_fields((&mut a, &mut b, &mut c)).unwrap();
//! assert_eq!((a, b.as_str(), c), (7, "hi", Some(1)));
//! ```
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// The derives name this crate by path.
extern crate self as bytearc;

mod bridges;
mod error;
mod impls;
pub mod layout;
pub mod members;
mod options;
mod reader;
pub mod seq;
mod traits;
pub mod varint;
mod view;
mod writer;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

pub use error::{Error, Result};
pub use impls::Pod;
pub use layout::{FieldLayout, Layout};
pub use options::{
    AllocLimit, Append, ArchiveOption, ByteOrder, Config, Reserve, Resize, SizePrefix,
};
pub use reader::Reader;
pub use traits::{ArchiveKind, Decode, DecodeFields, Encode, View};
pub use view::ByteView;
pub use writer::Writer;

#[cfg(feature = "serde")]
pub use bridges::ArchiveSerde;

#[cfg(feature = "derive")]
pub use bytearc_macros::{Decode, Encode};

/// Encode `value` into a fresh buffer.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Writer::new(&mut buf).write(value)?;
    Ok(buf)
}

/// Encode `value` into `buf`, returning the number of bytes written.
///
/// Fails with [`Error::OutOfRange`] if `buf` is too small.
pub fn to_slice<T: Encode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let mut writer = Writer::new(buf);
    writer.write(value)?;
    Ok(writer.position())
}

/// Decode a `T` from the start of `bytes`. Trailing bytes are ignored.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T> {
    Reader::new(bytes).read()
}
