// Copyright 2020 The Exonum Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A definition of `Field` trait and implementations for scalar, string, fixed-size,
//! tuple and pointer types.
//!
//! Variable-size containers are implemented in the `segments` module.

use bytemuck::Pod;
use log::trace;

use std::ops::{Deref, DerefMut};

use crate::{
    cursor::{Decoder, Encoder},
    Result,
};

/// Encoding strategy selected for a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Flat value copied by its bit pattern: primitives and POD aggregates.
    Raw,
    /// Length-framed string.
    String,
    /// Array of static length, encoded without a length prefix.
    FixedContainer,
    /// Sequence, set or map, encoded with a length prefix.
    VariableContainer,
    /// Nullable exclusively owned value, encoded with a presence flag.
    OwnedPointer,
    /// Serializable object encoded through its own field chain.
    Nested,
    /// Tuple encoded element by element.
    Tuple,
}

/// Trait for all types that could be a field of a record.
///
/// The implementation is selected statically by the field type; a type without an
/// implementation cannot be passed to `serialize` or `deserialize` at all.
pub trait Field {
    /// Encoding strategy of the type.
    const CATEGORY: Category;

    /// Writes the field at the encoder position.
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()>;

    /// Reads the field at the decoder position, replacing its current value.
    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()>;
}

macro_rules! implement_primitive_field {
    ($($type:ty),*) => {
        $(
            impl Field for $type {
                const CATEGORY: Category = Category::Raw;

                fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
                    encoder.encode_primitive(*self)
                }

                fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
                    *self = decoder.decode_primitive()?;
                    Ok(())
                }
            }
        )*
    };
}

implement_primitive_field! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64, bool, char
}

impl Field for String {
    const CATEGORY: Category = Category::String;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encoder.encode_str(self)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        *self = decoder.decode_string()?;
        Ok(())
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    const CATEGORY: Category = Category::FixedContainer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(encoder))
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        self.iter_mut().try_for_each(|item| item.decode(decoder))
    }
}

macro_rules! implement_tuple_field {
    ($($name:ident: $index:tt),+) => {
        impl<$($name: Field),+> Field for ($($name,)+) {
            const CATEGORY: Category = Category::Tuple;

            fn encode<W: Encoder>(&self, encoder: &mut W) -> Result<()> {
                $( self.$index.encode(encoder)?; )+
                Ok(())
            }

            fn decode<R: Decoder>(&mut self, decoder: &mut R) -> Result<()> {
                $( self.$index.decode(decoder)?; )+
                Ok(())
            }
        }
    };
}

implement_tuple_field!(A: 0);
implement_tuple_field!(A: 0, B: 1);
implement_tuple_field!(A: 0, B: 1, C: 2);
implement_tuple_field!(A: 0, B: 1, C: 2, D: 3);
implement_tuple_field!(A: 0, B: 1, C: 2, D: 3, E: 4);
implement_tuple_field!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
implement_tuple_field!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
implement_tuple_field!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// A box is transparent: it encodes exactly as its content and is decoded in place.
///
/// Use `Option<Box<T>>` for a nullable owned pointer.
impl<T: Field> Field for Box<T> {
    const CATEGORY: Category = T::CATEGORY;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        (**self).encode(encoder)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        (**self).decode(decoder)
    }
}

/// Encoded as a `bool` presence flag followed by the value, if any.
///
/// A present value is decoded into a fresh default value which then replaces the
/// previous content of the field, releasing it. An absent value releases the previous
/// content and leaves `None`.
impl<T: Field + Default> Field for Option<T> {
    const CATEGORY: Category = Category::OwnedPointer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        match self {
            Some(value) => {
                encoder.encode_primitive(true)?;
                value.encode(encoder)
            }
            None => encoder.encode_primitive(false),
        }
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        let value = if decoder.decode_primitive::<bool>()? {
            let mut value = T::default();
            value.decode(decoder)?;
            Some(value)
        } else {
            None
        };

        if self.is_some() {
            trace!(
                "Releasing owned value replaced at position {}",
                decoder.position()
            );
        }
        *self = value;
        Ok(())
    }
}

/// Writes the in-memory representation of a POD value.
pub fn encode_pod<T: Pod, E: Encoder>(value: &T, encoder: &mut E) -> Result<()> {
    encoder.encode_raw(bytemuck::bytes_of(value))
}

/// Reads the in-memory representation of a POD value.
///
/// `value` is left untouched if decoding fails.
pub fn decode_pod<T: Pod, D: Decoder>(value: &mut T, decoder: &mut D) -> Result<()> {
    let mut decoded = *value;
    decoder.decode_raw(bytemuck::bytes_of_mut(&mut decoded))?;
    *value = decoded;
    Ok(())
}

/// Raw aggregate wrapper: a POD value encoded by copying its bytes.
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use exonum_fields::{deserialize, serialize, Raw};
///
/// #[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
/// #[repr(C)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point = Raw(Point { x: 7, y: -3 });
/// let mut buffer: Vec<u8> = Vec::new();
/// serialize(&mut buffer, 0, (&point,)).unwrap();
/// assert_eq!(buffer, bytemuck::bytes_of(&*point));
///
/// let mut restored = Raw(Point::default());
/// deserialize(&buffer, 0, (&mut restored,)).unwrap();
/// assert_eq!(restored, point);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Raw<T>(pub T);

impl<T> Raw<T> {
    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Raw<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Raw<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Raw<T> {
    fn from(value: T) -> Self {
        Raw(value)
    }
}

impl<T: Pod> Field for Raw<T> {
    const CATEGORY: Category = Category::Raw;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encode_pod(&self.0, encoder)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        decode_pod(&mut self.0, decoder)
    }
}
