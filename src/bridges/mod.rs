#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "serde")]
pub use self::serde::ArchiveSerde;
