//! Error type shared by every encode and decode routine.

use snafu::Snafu;

/// Error during encoding or decoding.
///
/// Every recursive step forwards the first failure unchanged, so the variant
/// always describes the innermost operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// A read, or a write into fixed storage, would run past the view.
    #[snafu(display("out of range: needed {needed} bytes, only {available} available"))]
    OutOfRange {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// A decoded length does not fit a fixed-capacity destination.
    #[snafu(display("value too large: {len} elements exceed capacity of {capacity}"))]
    ValueTooLarge {
        /// Declared element count.
        len: usize,
        /// Destination capacity.
        capacity: usize,
    },

    /// A decoded sum-type tag names no alternative.
    #[snafu(display("invalid discriminant {tag}: type has {alternatives} alternatives"))]
    InvalidDiscriminant {
        /// Decoded tag byte.
        tag: u8,
        /// Number of alternatives of the destination type.
        alternatives: usize,
    },

    /// A decoded length would allocate more than the archive's limit.
    #[snafu(display("allocation of {requested} bytes exceeds limit of {limit} bytes"))]
    AllocLimit {
        /// Bytes the declared length would require.
        requested: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The value cannot be encoded as given.
    #[snafu(display("invalid argument: {message}"))]
    InvalidArgument {
        /// Error description.
        message: &'static str,
    },

    /// The input bytes are not a valid encoding of the destination type.
    #[snafu(display("invalid data: {message}"))]
    InvalidData {
        /// Error description.
        message: &'static str,
    },

    /// A writer was constructed over a read-only view.
    #[snafu(display("cannot write to a read-only view"))]
    ReadOnly,
}

/// Result type for archive operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;

        let kind = match err {
            Error::OutOfRange { .. } => ErrorKind::UnexpectedEof,
            Error::ValueTooLarge { .. } | Error::AllocLimit { .. } => ErrorKind::OutOfMemory,
            Error::InvalidDiscriminant { .. } | Error::InvalidData { .. } => ErrorKind::InvalidData,
            Error::InvalidArgument { .. } => ErrorKind::InvalidInput,
            Error::ReadOnly => ErrorKind::PermissionDenied,
        };
        std::io::Error::new(kind, err)
    }
}
