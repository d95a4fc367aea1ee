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

//! Field-by-field serialization of objects into binary or text records.
//!
//! The crate encodes an ordered list of fields into a *record* and decodes it back.
//! Field types are resolved at compile time: each type implementing [`Field`] selects
//! one encoding strategy ([`Category`]), so a type that cannot be encoded is rejected
//! by the compiler instead of failing at run time.
//!
//! # Records
//!
//! The memory a record is written to selects its format:
//!
//! - Byte memories (`Vec<u8>`, `[u8]`, [`Bytes`]) hold *positional binary records*:
//!   a concatenation of the encoded fields without header or schema. Numbers use
//!   the native byte order and word size, strings and variable-size containers are
//!   prefixed with their `usize` length, fixed-size arrays carry no length.
//! - `String` holds *delimited text records*: each primitive is a token followed by
//!   the delimiter from [`Options`], strings are framed by their length.
//!
//! Records carry no type tags. A consumer must decode a record with the same field type
//! sequence the producer used; a mismatch is not detected as such.
//!
//! # Serialize and deserialize
//!
//! [`serialize`] and [`deserialize`] take a memory, a start position and a tuple of
//! arguments, and return the position after the record. The returned position can be
//! used to place several records back-to-back in one memory. An argument is one of:
//!
//! - a reference to a field (`&T` for encoding, `&mut T` for both directions);
//! - a field chain built with [`chain`] or returned by [`Serializable::fields`];
//! - a [`Hook`] wrapping a [`PhaseHook`], which receives the traversal [`Context`]
//!   and may, for example, reserve a size prefix and backfill it after the payload.
//!
//! The outermost `serialize` call (the one starting at position `0`) trims a resizable
//! memory to the end of the record. `deserialize` never modifies the memory.
//!
//! # Registering types
//!
//! Structs are registered with the [`serializable!`] macro, which lists their fields in
//! order and makes them usable as nested fields. POD types can be copied byte-for-byte
//! with [`Raw`], [`implement_raw_field!`] or the struct fast path
//! ([`serialize_struct`] and [`deserialize_struct`]). Types exposing getters and setters
//! can be bound to a list of accessors with [`bind`].
//!
//! [`Field`]: trait.Field.html
//! [`Category`]: enum.Category.html
//! [`Bytes`]: struct.Bytes.html
//! [`Options`]: struct.Options.html
//! [`serialize`]: fn.serialize.html
//! [`deserialize`]: fn.deserialize.html
//! [`chain`]: fn.chain.html
//! [`Serializable::fields`]: trait.Serializable.html#tymethod.fields
//! [`Hook`]: struct.Hook.html
//! [`PhaseHook`]: trait.PhaseHook.html
//! [`Context`]: struct.Context.html
//! [`serializable!`]: macro.serializable.html
//! [`Raw`]: struct.Raw.html
//! [`implement_raw_field!`]: macro.implement_raw_field.html
//! [`serialize_struct`]: fn.serialize_struct.html
//! [`deserialize_struct`]: fn.deserialize_struct.html
//! [`bind`]: fn.bind.html

#![warn(
    missing_debug_implementations,
    unsafe_code,
    bare_trait_objects,
    missing_docs
)]
#![warn(clippy::pedantic)]
#![allow(
    // Next `cast_*` lints don't give alternatives.
    clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss,
    // Next lints produce too much noise/false positives.
    clippy::module_name_repetitions, clippy::similar_names,
    // '... may panic' lints.
    clippy::indexing_slicing,
    clippy::missing_errors_doc,
)]

pub use self::{
    binding::{bind, Accessor, Accessors, Bound, Member, Property},
    buffer::{ByteSink, Bytes, Memory},
    chain::{
        chain, decode_nested, encode_nested, FieldChain, FieldChainMut, FieldInfo, IntoChain, Nil,
        Node, Serializable,
    },
    cursor::{BinaryReader, BinaryWriter, Cursor, Decoder, Encoder, Transcode},
    error::Error,
    fields::{decode_pod, encode_pod, Category, Field, Raw},
    options::Options,
    primitives::Primitive,
    structs::{deserialize_struct, serialize_struct},
    text::{TextReader, TextWriter},
    traversal::{
        deserialize, deserialize_with, serialize, serialize_with, Context, DecodeArg, DecodeArgs,
        EncodeArg, EncodeArgs, Hook, Phase, PhaseHook,
    },
};

/// A type alias for the results of encoding and decoding.
pub type Result<T> = std::result::Result<T, Error>;

#[macro_use]
mod macros;

mod binding;
mod buffer;
mod chain;
mod cursor;
mod error;
mod fields;
mod options;
mod primitives;
mod segments;
mod structs;
mod text;
mod traversal;
