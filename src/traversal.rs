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

//! Entry points of the engine: `serialize` and `deserialize`.
//!
//! Both bind a cursor of the memory at the given position and process the argument
//! tuple left to right. An argument is either a field reference, a field chain, or a
//! [`Hook`] that receives a [`Context`] and decides itself what to do in each phase.
//!
//! [`Hook`]: struct.Hook.html
//! [`Context`]: struct.Context.html

use log::debug;

use crate::{
    buffer::Memory,
    chain::{FieldChain, FieldChainMut, Nil, Node},
    cursor::{Cursor, Decoder, Encoder, Transcode},
    Field, Options, Result,
};

/// Direction of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fields are encoded into the memory.
    Serialization,
    /// Fields are decoded from the memory.
    Deserialization,
}

/// Phase and cursor handed to a phase hook.
#[derive(Debug)]
pub struct Context<'c, T> {
    cursor: &'c mut T,
}

impl<'c, T: Transcode> Context<'c, T> {
    /// Wraps a cursor.
    pub fn new(cursor: &'c mut T) -> Self {
        Self { cursor }
    }

    /// Phase of the traversal.
    pub fn phase(&self) -> Phase {
        T::PHASE
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Moves the cursor.
    pub fn seek(&mut self, position: usize) {
        self.cursor.seek(position);
    }

    /// Encodes or decodes `field`, depending on the phase.
    pub fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()> {
        self.cursor.transcode(field)
    }

    /// Returns the underlying cursor.
    pub fn cursor(&mut self) -> &mut T {
        self.cursor
    }
}

/// Phase-aware argument logic.
///
/// ```
/// use exonum_fields::{deserialize, serialize, Context, Hook, Phase, PhaseHook, Result, Transcode};
///
/// /// Stores a checksum of the payload and verifies it on decode.
/// struct Checked<'a>(&'a mut Vec<u8>);
///
/// impl PhaseHook for Checked<'_> {
///     fn call<T: Transcode>(&mut self, mut cx: Context<'_, T>) -> Result<()> {
///         let mut sum = self.0.iter().map(|&b| u32::from(b)).sum::<u32>();
///         let payload = &mut *self.0;
///         cx.transcode(payload)?;
///         let expected = payload.iter().map(|&b| u32::from(b)).sum::<u32>();
///         cx.transcode(&mut sum)?;
///         if cx.phase() == Phase::Deserialization && sum != expected {
///             return Err("checksum mismatch".into());
///         }
///         Ok(())
///     }
/// }
///
/// let mut payload = vec![1, 2, 3];
/// let mut buffer: Vec<u8> = Vec::new();
/// serialize(&mut buffer, 0, (Hook(Checked(&mut payload)),)).unwrap();
///
/// let mut restored = Vec::new();
/// deserialize(&buffer, 0, (Hook(Checked(&mut restored)),)).unwrap();
/// assert_eq!(restored, payload);
/// ```
pub trait PhaseHook {
    /// Handles the argument in the phase given by `cx`.
    fn call<T: Transcode>(&mut self, cx: Context<'_, T>) -> Result<()>;
}

impl<H: PhaseHook + ?Sized> PhaseHook for &mut H {
    fn call<T: Transcode>(&mut self, cx: Context<'_, T>) -> Result<()> {
        (**self).call(cx)
    }
}

/// Marks a phase hook passed as a traversal argument.
#[derive(Debug)]
pub struct Hook<H>(pub H);

/// Argument of `serialize`.
pub trait EncodeArg {
    /// Encodes the argument.
    fn encode_arg<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()>;
}

/// Argument of `deserialize`.
pub trait DecodeArg {
    /// Decodes the argument.
    fn decode_arg<R: Decoder + Transcode>(self, reader: &mut R) -> Result<()>;
}

impl<T: Field> EncodeArg for &T {
    fn encode_arg<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()> {
        self.encode(writer)
    }
}

impl<T: Field> EncodeArg for &mut T {
    fn encode_arg<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()> {
        self.encode(writer)
    }
}

impl<T: Field> DecodeArg for &mut T {
    fn decode_arg<R: Decoder + Transcode>(self, reader: &mut R) -> Result<()> {
        self.decode(reader)
    }
}

impl<H: PhaseHook> EncodeArg for Hook<H> {
    fn encode_arg<W: Encoder + Transcode>(mut self, writer: &mut W) -> Result<()> {
        self.0.call(Context::new(writer))
    }
}

impl<H: PhaseHook> DecodeArg for Hook<H> {
    fn decode_arg<R: Decoder + Transcode>(mut self, reader: &mut R) -> Result<()> {
        self.0.call(Context::new(reader))
    }
}

impl EncodeArg for Nil {
    fn encode_arg<W: Encoder + Transcode>(self, _writer: &mut W) -> Result<()> {
        Ok(())
    }
}

impl DecodeArg for Nil {
    fn decode_arg<R: Decoder + Transcode>(self, _reader: &mut R) -> Result<()> {
        Ok(())
    }
}

impl<R, N> EncodeArg for Node<R, N>
where
    Self: FieldChain,
{
    fn encode_arg<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()> {
        self.encode_fields(writer)
    }
}

impl<R, N> DecodeArg for Node<R, N>
where
    Self: FieldChainMut,
{
    fn decode_arg<D: Decoder + Transcode>(mut self, reader: &mut D) -> Result<()> {
        self.decode_fields(reader)
    }
}

/// Argument tuple of `serialize`.
pub trait EncodeArgs {
    /// Encodes the arguments left to right.
    fn encode_args<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()>;
}

/// Argument tuple of `deserialize`.
pub trait DecodeArgs {
    /// Decodes the arguments left to right.
    fn decode_args<R: Decoder + Transcode>(self, reader: &mut R) -> Result<()>;
}

macro_rules! implement_args {
    ($($name:ident),*) => {
        impl<$($name: EncodeArg),*> EncodeArgs for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn encode_args<W: Encoder + Transcode>(self, writer: &mut W) -> Result<()> {
                let ($($name,)*) = self;
                $( $name.encode_arg(writer)?; )*
                Ok(())
            }
        }

        impl<$($name: DecodeArg),*> DecodeArgs for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn decode_args<R: Decoder + Transcode>(self, reader: &mut R) -> Result<()> {
                let ($($name,)*) = self;
                $( $name.decode_arg(reader)?; )*
                Ok(())
            }
        }
    };
}

implement_args!();
implement_args!(A);
implement_args!(A, B);
implement_args!(A, B, C);
implement_args!(A, B, C, D);
implement_args!(A, B, C, D, E);
implement_args!(A, B, C, D, E, F);
implement_args!(A, B, C, D, E, F, G);
implement_args!(A, B, C, D, E, F, G, H);
implement_args!(A, B, C, D, E, F, G, H, I);
implement_args!(A, B, C, D, E, F, G, H, I, J);
implement_args!(A, B, C, D, E, F, G, H, I, J, K);
implement_args!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Encodes `args` into `memory` starting at `position` with default options.
///
/// Returns the position after the record, which is where the next record sharing
/// the memory may start. A call at position `0` is the outermost one: afterwards
/// a resizable memory is trimmed to the returned position.
///
/// # Examples
///
/// ```
/// use exonum_fields::{deserialize, serialize};
///
/// let mut buffer: Vec<u8> = Vec::new();
/// let first = serialize(&mut buffer, 0, (&1_u32, &"one".to_owned())).unwrap();
/// let second = serialize(&mut buffer, first, (&2_u32,)).unwrap();
/// assert_eq!(second, buffer.len());
///
/// let (mut id, mut name) = (0_u32, String::new());
/// assert_eq!(deserialize(&buffer, 0, (&mut id, &mut name)).unwrap(), first);
/// assert_eq!((id, name.as_str()), (1, "one"));
/// assert_eq!(deserialize(&buffer, first, (&mut id,)).unwrap(), second);
/// assert_eq!(id, 2);
/// ```
pub fn serialize<M, A>(memory: &mut M, position: usize, args: A) -> Result<usize>
where
    M: Memory + ?Sized,
    A: EncodeArgs,
{
    serialize_with(&Options::default(), memory, position, args)
}

/// Encodes `args` into `memory` starting at `position`.
pub fn serialize_with<M, A>(
    options: &Options,
    memory: &mut M,
    position: usize,
    args: A,
) -> Result<usize>
where
    M: Memory + ?Sized,
    A: EncodeArgs,
{
    options.validate()?;
    let end = {
        let mut writer = memory.writer(position, *options);
        args.encode_args(&mut writer)?;
        writer.position()
    };

    let top_level = position == 0;
    if top_level && options.trim_top_level {
        memory.trim(end)?;
    }
    debug!(
        "Serialized record [{}, {}), top level: {}",
        position, end, top_level
    );
    Ok(end)
}

/// Decodes `args` from `memory` starting at `position` with default options.
///
/// Returns the position after the record. Fields are decoded in place; if decoding
/// fails, the fields preceding the failed one keep their new values.
pub fn deserialize<M, A>(memory: &M, position: usize, args: A) -> Result<usize>
where
    M: Memory + ?Sized,
    A: DecodeArgs,
{
    deserialize_with(&Options::default(), memory, position, args)
}

/// Decodes `args` from `memory` starting at `position`.
pub fn deserialize_with<M, A>(
    options: &Options,
    memory: &M,
    position: usize,
    args: A,
) -> Result<usize>
where
    M: Memory + ?Sized,
    A: DecodeArgs,
{
    options.validate()?;
    let mut reader = memory.reader(position, *options);
    args.decode_args(&mut reader)?;
    let end = reader.position();
    debug!("Deserialized record [{}, {})", position, end);
    Ok(end)
}
