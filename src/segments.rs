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

//! `Field` implementations for variable-size containers.
//!
//! Every container is encoded as a length prefix followed by its items in iteration
//! order; maps encode each entry as a key followed by its value. Decoding builds a new
//! container and replaces the field only when all items are read.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    hash::{BuildHasher, Hash},
};

use crate::{
    cursor::{Decoder, Encoder},
    fields::{Category, Field},
    Result,
};

fn encode_items<'a, T, E, I>(encoder: &mut E, len: usize, items: I) -> Result<()>
where
    T: Field + 'a,
    E: Encoder,
    I: IntoIterator<Item = &'a T>,
{
    encoder.encode_len(len)?;
    items.into_iter().try_for_each(|item| item.encode(encoder))
}

fn decode_items<T, D, C>(decoder: &mut D) -> Result<C>
where
    T: Field + Default,
    D: Decoder,
    C: Default + Extend<T>,
{
    let len = decoder.decode_len()?;
    let mut items = C::default();
    for _ in 0..len {
        let mut item = T::default();
        item.decode(decoder)?;
        items.extend(Some(item));
    }
    Ok(items)
}

fn encode_entries<'a, K, V, E, I>(encoder: &mut E, len: usize, entries: I) -> Result<()>
where
    K: Field + 'a,
    V: Field + 'a,
    E: Encoder,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    encoder.encode_len(len)?;
    for (key, value) in entries {
        key.encode(encoder)?;
        value.encode(encoder)?;
    }
    Ok(())
}

macro_rules! implement_sequence_field {
    ($($container:ident),*) => {
        $(
            impl<T: Field + Default> Field for $container<T> {
                const CATEGORY: Category = Category::VariableContainer;

                fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
                    encode_items(encoder, self.len(), self)
                }

                fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
                    *self = decode_items(decoder)?;
                    Ok(())
                }
            }
        )*
    };
}

implement_sequence_field!(Vec, VecDeque, LinkedList);

impl<T: Field + Default + Ord> Field for BTreeSet<T> {
    const CATEGORY: Category = Category::VariableContainer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encode_items(encoder, self.len(), self)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        *self = decode_items(decoder)?;
        Ok(())
    }
}

impl<T, S> Field for HashSet<T, S>
where
    T: Field + Default + Eq + Hash,
    S: BuildHasher + Default,
{
    const CATEGORY: Category = Category::VariableContainer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encode_items(encoder, self.len(), self)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        *self = decode_items(decoder)?;
        Ok(())
    }
}

impl<K, V> Field for BTreeMap<K, V>
where
    K: Field + Default + Ord,
    V: Field + Default,
{
    const CATEGORY: Category = Category::VariableContainer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encode_entries(encoder, self.len(), self)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        *self = decode_items::<(K, V), _, _>(decoder)?;
        Ok(())
    }
}

impl<K, V, S> Field for HashMap<K, V, S>
where
    K: Field + Default + Eq + Hash,
    V: Field + Default,
    S: BuildHasher + Default,
{
    const CATEGORY: Category = Category::VariableContainer;

    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<()> {
        encode_entries(encoder, self.len(), self)
    }

    fn decode<D: Decoder>(&mut self, decoder: &mut D) -> Result<()> {
        *self = decode_items::<(K, V), _, _>(decoder)?;
        Ok(())
    }
}
