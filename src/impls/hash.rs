use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use crate::seq::{self, ArchiveLen, Sequence, SequenceMut};
use crate::{Decode, Encode, Reader, Result, Writer};

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<K: Encode, V: Encode, S> Sequence for HashMap<K, V, S> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.iter().try_for_each(|(key, value)| {
            key.encode(writer)?;
            value.encode(writer)
        })
    }
}

impl<K, V, S> SequenceMut for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher,
{
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<(K, V)>(len)?;
        self.clear();
        self.reserve(len.min(reader.remaining()));
        for _ in 0..len {
            let key = K::decode(reader)?;
            let value = V::decode(reader)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<T: Encode, S> Encode for HashSet<T, S> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<T: Encode, S> Sequence for HashSet<T, S> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T, S> SequenceMut for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<T>(len)?;
        self.clear();
        self.reserve(len.min(reader.remaining()));
        for _ in 0..len {
            self.insert(T::decode(reader)?);
        }
        Ok(())
    }
}
