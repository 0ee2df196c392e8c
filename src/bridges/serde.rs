use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Decode, Encode};

/// Embeds an encoded value in any serde format.
///
/// Human-readable formats (JSON, TOML, YAML) carry the encoding as a base64
/// string; binary formats carry it as a byte string.
///
/// ```
/// use bytearc::ArchiveSerde;
///
/// let json = serde_json::to_string(&ArchiveSerde(vec![1u16, 2])).unwrap();
/// assert_eq!(json, "\"AgAAAAEAAgA=\"");
/// let back: ArchiveSerde<Vec<u16>> = serde_json::from_str(&json).unwrap();
/// assert_eq!(back.0, [1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArchiveSerde<T>(pub T);

impl<T: Encode> Serialize for ArchiveSerde<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = crate::to_vec(&self.0).map_err(serde::ser::Error::custom)?;
        if serializer.is_human_readable() {
            serializer.serialize_str(&STANDARD.encode(&bytes))
        } else {
            serializer.serialize_bytes(&bytes)
        }
    }
}

impl<'de, T: Decode> Deserialize<'de> for ArchiveSerde<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            STANDARD.decode(text).map_err(|_| de::Error::custom("invalid base64"))?
        } else {
            deserializer.deserialize_byte_buf(BytesVisitor(PhantomData))?
        };
        crate::from_slice(&bytes).map(ArchiveSerde).map_err(de::Error::custom)
    }
}

struct BytesVisitor(PhantomData<Vec<u8>>);

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an encoded byte string")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(bytes)
    }
}
