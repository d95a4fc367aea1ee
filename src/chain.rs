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

//! Field descriptor chains.
//!
//! A chain is a statically typed list of named field references: `Node<R, Node<.., Nil>>`.
//! Its type spells out every field type in declaration order, so encoding and decoding
//! are resolved at compile time and no type information is erased.
//!
//! Chains of shared references can only be encoded; chains of exclusive references
//! can be both encoded and decoded.

use log::trace;

use std::ops::{Deref, DerefMut};

use crate::{
    cursor::{Decoder, Encoder},
    fields::{Category, Field},
    Error, Result,
};

/// The empty chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nil;

/// Chain node binding one named field reference to the rest of the chain.
///
/// The node never owns the field; `reference` is `&T` or `&mut T`.
#[derive(Debug)]
pub struct Node<R, N> {
    name: &'static str,
    reference: R,
    next: N,
}

impl<R, N> Node<R, N> {
    /// Creates a node in front of `next`.
    pub fn new(name: &'static str, reference: R, next: N) -> Self {
        Self {
            name,
            reference,
            next,
        }
    }

    /// Name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rest of the chain.
    pub fn next(&self) -> &N {
        &self.next
    }
}

/// Name and encoding strategy of a chained field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name.
    pub name: &'static str,
    /// Encoding strategy of the field type.
    pub category: Category,
}

/// Chain whose fields can be encoded.
pub trait FieldChain {
    /// Number of fields in the chain.
    const LEN: usize;

    /// Encodes the fields in chain order.
    fn encode_fields<E: Encoder>(&self, encoder: &mut E) -> Result<()>;

    /// Appends the description of every field to `layout`.
    fn collect_layout(&self, layout: &mut Vec<FieldInfo>);

    /// Describes the fields in chain order.
    fn layout(&self) -> Vec<FieldInfo> {
        let mut layout = Vec::with_capacity(Self::LEN);
        self.collect_layout(&mut layout);
        layout
    }
}

/// Chain whose fields can be decoded in place.
pub trait FieldChainMut: FieldChain {
    /// Decodes the fields in chain order.
    ///
    /// Fields preceding a failed one keep their decoded values.
    fn decode_fields<D: Decoder>(&mut self, decoder: &mut D) -> Result<()>;
}

impl FieldChain for Nil {
    const LEN: usize = 0;

    fn encode_fields<E: Encoder>(&self, _encoder: &mut E) -> Result<()> {
        Ok(())
    }

    fn collect_layout(&self, _layout: &mut Vec<FieldInfo>) {}
}

impl FieldChainMut for Nil {
    fn decode_fields<D: Decoder>(&mut self, _decoder: &mut D) -> Result<()> {
        Ok(())
    }
}

impl<R, N> FieldChain for Node<R, N>
where
    R: Deref,
    R::Target: Field,
    N: FieldChain,
{
    const LEN: usize = N::LEN + 1;

    fn encode_fields<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        trace!(
            "Encoding field `{}` ({:?}) at position {}",
            self.name,
            <R::Target as Field>::CATEGORY,
            encoder.position()
        );
        self.reference.deref().encode(encoder)?;
        self.next.encode_fields(encoder)
    }

    fn collect_layout(&self, layout: &mut Vec<FieldInfo>) {
        layout.push(FieldInfo {
            name: self.name,
            category: <R::Target as Field>::CATEGORY,
        });
        self.next.collect_layout(layout);
    }
}

impl<R, N> FieldChainMut for Node<R, N>
where
    R: DerefMut,
    R::Target: Field,
    N: FieldChainMut,
{
    fn decode_fields<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        trace!(
            "Decoding field `{}` ({:?}) at position {}",
            self.name,
            <R::Target as Field>::CATEGORY,
            decoder.position()
        );
        self.reference.deref_mut().decode(decoder)?;
        self.next.decode_fields(decoder)
    }
}

/// Tuple of field references convertible into a chain.
pub trait IntoChain {
    /// Resulting chain type.
    type Chain;
    /// Number of references.
    const LEN: usize;

    /// Builds the chain head-first, taking one leading name from `names` per node.
    fn into_chain(self, names: &'static str) -> Self::Chain;
}

fn split_name(names: &'static str) -> (&'static str, &'static str) {
    match names.find(',') {
        Some(index) => (names[..index].trim(), &names[index + 1..]),
        None => (names.trim(), ""),
    }
}

impl IntoChain for () {
    type Chain = Nil;
    const LEN: usize = 0;

    fn into_chain(self, _names: &'static str) -> Nil {
        Nil
    }
}

macro_rules! implement_into_chain {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head $(, $tail)*> IntoChain for ($head, $($tail,)*) {
            type Chain = Node<$head, <($($tail,)*) as IntoChain>::Chain>;
            const LEN: usize = <($($tail,)*) as IntoChain>::LEN + 1;

            #[allow(non_snake_case)]
            fn into_chain(self, names: &'static str) -> Self::Chain {
                let ($head, $($tail,)*) = self;
                let (name, rest) = split_name(names);
                Node::new(name, $head, ($($tail,)*).into_chain(rest))
            }
        }

        implement_into_chain!($($tail),*);
    };
    () => {};
}

implement_into_chain!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Builds a chain from a tuple of field references and a comma-separated list of
/// their names.
///
/// # Errors
///
/// Returns `Error::FieldNames` if the list names a different number of fields than
/// `refs` holds, or contains an empty name.
///
/// # Examples
///
/// ```
/// use exonum_fields::{chain, deserialize, serialize};
///
/// let (id, tags) = (7_u32, vec!["a".to_owned()]);
/// let mut buffer: Vec<u8> = Vec::new();
/// serialize(&mut buffer, 0, (chain((&id, &tags), "id, tags").unwrap(),)).unwrap();
///
/// let (mut id2, mut tags2) = (0_u32, Vec::<String>::new());
/// let fields = chain((&mut id2, &mut tags2), "id, tags").unwrap();
/// deserialize(&buffer, 0, (fields,)).unwrap();
/// assert_eq!((id2, tags2), (id, tags));
/// ```
pub fn chain<T: IntoChain>(refs: T, names: &'static str) -> Result<T::Chain> {
    let found = if names.trim().is_empty() {
        0
    } else {
        let mut found = 0;
        for name in names.split(',') {
            if name.trim().is_empty() {
                return Err(Error::FieldNames {
                    expected: T::LEN,
                    found,
                });
            }
            found += 1;
        }
        found
    };

    if found != T::LEN {
        return Err(Error::FieldNames {
            expected: T::LEN,
            found,
        });
    }
    Ok(refs.into_chain(names))
}

/// Host type whose fields form a chain.
///
/// Implemented by the [`serializable!`](macro.serializable.html) macro, which also makes
/// the type usable as a nested field.
pub trait Serializable {
    /// Chain of shared references to the fields.
    type Fields<'a>: FieldChain
    where
        Self: 'a;
    /// Chain of exclusive references to the fields.
    type FieldsMut<'a>: FieldChainMut
    where
        Self: 'a;

    /// Returns the chain of shared field references.
    fn fields(&self) -> Self::Fields<'_>;

    /// Returns the chain of exclusive field references.
    fn fields_mut(&mut self) -> Self::FieldsMut<'_>;
}

/// Encodes a nested object inline through its field chain.
pub fn encode_nested<T, E>(value: &T, encoder: &mut E) -> Result<()>
where
    T: Serializable + ?Sized,
    E: Encoder,
{
    value.fields().encode_fields(encoder)
}

/// Decodes a nested object inline through its field chain.
pub fn decode_nested<T, D>(value: &mut T, decoder: &mut D) -> Result<()>
where
    T: Serializable + ?Sized,
    D: Decoder,
{
    value.fields_mut().decode_fields(decoder)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        cursor::{BinaryWriter, Cursor},
        Options,
    };

    #[test]
    fn chain_is_built_head_first() {
        let (a, b, c) = (1_u8, "b".to_owned(), [0_u16; 2]);
        let fields = chain((&a, &b, &c), " a ,b,  c").unwrap();
        assert_eq!(fields.name(), "a");
        assert_eq!(fields.next().name(), "b");
        assert_eq!(fields.next().next().name(), "c");
        assert_eq!(*fields.next().next().next(), Nil);
        assert_eq!(
            fields.layout(),
            vec![
                FieldInfo {
                    name: "a",
                    category: Category::Raw
                },
                FieldInfo {
                    name: "b",
                    category: Category::String
                },
                FieldInfo {
                    name: "c",
                    category: Category::FixedContainer
                },
            ]
        );
    }

    #[test]
    fn empty_chain_is_identity() {
        let fields = chain((), "").unwrap();
        assert_eq!(fields, Nil);
        assert!(fields.layout().is_empty());

        let mut buffer = vec![5_u8];
        let mut writer = BinaryWriter::new(&mut buffer, 1, Options::default());
        Nil.encode_fields(&mut writer).unwrap();
        assert_eq!(writer.position(), 1);
        assert_eq!(buffer, vec![5]);
    }

    #[test]
    fn name_count_mismatch() {
        let (a, b) = (1_u8, 2_u8);
        assert_matches!(
            chain((&a, &b), "a"),
            Err(Error::FieldNames {
                expected: 2,
                found: 1
            })
        );
        assert_matches!(
            chain((&a,), "a, b, c"),
            Err(Error::FieldNames {
                expected: 1,
                found: 3
            })
        );
        assert_matches!(
            chain((&a, &b), "a,,b"),
            Err(Error::FieldNames { expected: 2, .. })
        );
        assert_matches!(chain((&a,), ""), Err(Error::FieldNames { found: 0, .. }));
    }

    #[test]
    fn chain_len() {
        let (a, b) = (1_u8, 2_u64);
        let fields = chain((&a, &b), "a, b").unwrap();
        fn len_of<C: FieldChain>(_: &C) -> usize {
            C::LEN
        }
        assert_eq!(len_of(&fields), 2);
    }
}
