use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::rc::Rc;
use alloc::string::String;
#[cfg(target_has_atomic = "ptr")]
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::seq::{self, ArchiveLen, Sequence, SequenceMut};
use crate::{Decode, Encode, Error, Reader, Result, Writer};

// ============================================================================
// Dynamic sequences
// ============================================================================

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.as_slice().encode(writer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let len = reader.read_len()?;
        reader.check_alloc::<T>(len)?;
        T::decode_vec(len, reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<T: Encode> Sequence for Vec<T> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        T::encode_slice(self, writer)
    }
}

impl<T: Decode> SequenceMut for Vec<T> {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    /// Existing elements are decoded in place; missing ones are appended.
    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<T>(len)?;
        self.truncate(len);
        let existing = self.len();
        T::decode_slice_in_place(self, reader)?;
        if len > existing {
            let rest = T::decode_vec(len - existing, reader)?;
            if self.capacity() == 0 {
                *self = rest;
            } else {
                self.extend(rest);
            }
        }
        Ok(())
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<T: Encode> Sequence for VecDeque<T> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        let (front, back) = self.as_slices();
        T::encode_slice(front, writer)?;
        T::encode_slice(back, writer)
    }
}

impl<T: Decode> SequenceMut for VecDeque<T> {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<T>(len)?;
        *self = T::decode_vec(len, reader)?.into();
        Ok(())
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<T: Encode> Sequence for LinkedList<T> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T: Decode> SequenceMut for LinkedList<T> {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        // Each element lives in its own node with two links.
        reader.check_alloc::<(T, usize, usize)>(len)?;
        self.clear();
        for _ in 0..len {
            self.push_back(T::decode(reader)?);
        }
        Ok(())
    }
}

impl Encode for String {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.as_str().encode(writer)
    }
}

impl Decode for String {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl Sequence for String {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_bytes(self.as_bytes())
    }
}

impl SequenceMut for String {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<u8>(len)?;
        let text = core::str::from_utf8(reader.take(len)?).map_err(|_| Error::InvalidData {
            message: "invalid UTF-8",
        })?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

// ============================================================================
// Ordered collections
// ============================================================================

impl<T: Encode> Encode for BTreeSet<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<T: Encode> Sequence for BTreeSet<T> {
    #[inline]
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn encode_items(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T: Decode + Ord> SequenceMut for BTreeSet<T> {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<T>(len)?;
        self.clear();
        for _ in 0..len {
            self.insert(T::decode(reader)?);
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        seq::encode_prefixed::<Self, ArchiveLen>(self, writer)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        seq::decode_prefixed::<Self, ArchiveLen>(reader)
    }

    #[inline]
    fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        seq::decode_prefixed_in_place::<Self, ArchiveLen>(self, reader)
    }
}

impl<K: Encode, V: Encode> Sequence for BTreeMap<K, V> {
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

impl<K: Decode + Ord, V: Decode> SequenceMut for BTreeMap<K, V> {
    #[inline]
    fn current_len(&self) -> usize {
        self.len()
    }

    fn decode_items(&mut self, len: usize, reader: &mut Reader<'_>) -> Result<()> {
        reader.check_alloc::<(K, V)>(len)?;
        self.clear();
        for _ in 0..len {
            let key = K::decode(reader)?;
            let value = V::decode(reader)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

// ============================================================================
// Owning pointers
// ============================================================================

macro_rules! impl_owning_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Encode + ?Sized> Encode for $ptr<T> {
                #[inline]
                fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
                    (**self).encode(writer)
                }
            }

            // A fresh pointee is allocated on every decode and replaces the
            // previous one, so shared pointees are never mutated.
            impl<T: Decode> Decode for $ptr<T> {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    T::decode(reader).map($ptr::new)
                }
            }

            impl<T: Decode> Decode for $ptr<[T]> {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    Vec::<T>::decode(reader).map(Into::into)
                }
            }

            impl Decode for $ptr<str> {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    String::decode(reader).map(Into::into)
                }
            }
        )+
    };
}

impl_owning_pointer!(Box, Rc);
#[cfg(target_has_atomic = "ptr")]
impl_owning_pointer!(Arc);
