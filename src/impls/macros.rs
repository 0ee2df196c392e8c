use core::mem::size_of;

use crate::layout::Layout;
use crate::options::ByteOrder;
use crate::traits::DecodeFields;
use crate::{Decode, Encode, Reader, Result, Writer};

// Numeric primitives: `size_of` bytes in the archive's byte order
macro_rules! impl_primitive {
    ($($ty:ty),+) => {
        $(
            impl Encode for $ty {
                const LAYOUT: Layout<Self> = Layout::pod();

                #[inline]
                fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
                    match writer.byte_order() {
                        ByteOrder::Big => writer.put_bytes(&self.to_be_bytes()),
                        _ => writer.put_bytes(&self.to_le_bytes()),
                    }
                }
            }

            impl Decode for $ty {
                const LAYOUT: Layout<Self> = Layout::pod();

                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    let bytes = reader.take_array::<{ size_of::<$ty>() }>()?;
                    Ok(match reader.byte_order() {
                        ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                        _ => <$ty>::from_le_bytes(bytes),
                    })
                }
            }
        )+
    };
}

impl_primitive!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

// Tuples: positional, no prefix
macro_rules! impl_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[inline]
            fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
                $(self.$idx.encode(writer)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            #[inline]
            fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                Ok(($($name::decode(reader)?,)+))
            }

            #[inline]
            fn decode_in_place(&mut self, reader: &mut Reader<'_>) -> Result<()> {
                $(self.$idx.decode_in_place(reader)?;)+
                Ok(())
            }
        }

        impl<$($name: DecodeFields),+> DecodeFields for ($($name,)+) {
            #[inline]
            fn decode_fields(self, reader: &mut Reader<'_>) -> Result<()> {
                $(self.$idx.decode_fields(reader)?;)+
                Ok(())
            }
        }
    };
}

impl_tuple!(A 0);
impl_tuple!(A 0, B 1);
impl_tuple!(A 0, B 1, C 2);
impl_tuple!(A 0, B 1, C 2, D 3);
impl_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15);
