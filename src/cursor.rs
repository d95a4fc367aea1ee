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

//! Cursors over memories and the positional binary record format.
//!
//! A cursor is bound to a memory and a starting position for one traversal. Writers
//! implement [`Encoder`], readers implement [`Decoder`]; both implement [`Transcode`],
//! which lets phase-aware code drive a field in whichever direction the traversal runs.
//!
//! [`Encoder`]: trait.Encoder.html
//! [`Decoder`]: trait.Decoder.html
//! [`Transcode`]: trait.Transcode.html

use std::str;

use crate::{
    buffer::ByteSink, primitives::Primitive, traversal::Phase, Error, Field, Options, Result,
};

/// Read/write position shared by all cursors.
pub trait Cursor {
    /// Current position in the memory.
    fn position(&self) -> usize;

    /// Moves the cursor to `position`.
    ///
    /// Writers may seek past the end of a growable memory; the gap is filled on the
    /// next write. Readers report `Error::OutOfRange` on the next read instead.
    fn seek(&mut self, position: usize);

    /// Options the cursor was bound with.
    fn options(&self) -> &Options;
}

/// Cursor writing a record.
pub trait Encoder: Cursor {
    /// Writes a primitive value.
    fn encode_primitive<P: Primitive>(&mut self, value: P) -> Result<()>;

    /// Writes the bytes of a raw aggregate.
    fn encode_raw(&mut self, bytes: &[u8]) -> Result<()>;

    /// Writes a length-framed string.
    fn encode_str(&mut self, value: &str) -> Result<()>;

    /// Writes a container length prefix.
    fn encode_len(&mut self, len: usize) -> Result<()> {
        self.encode_primitive(len)
    }
}

/// Cursor reading a record.
pub trait Decoder: Cursor {
    /// Reads a primitive value.
    fn decode_primitive<P: Primitive>(&mut self) -> Result<P>;

    /// Reads the bytes of a raw aggregate into `buffer`.
    fn decode_raw(&mut self, buffer: &mut [u8]) -> Result<()>;

    /// Reads a length-framed string.
    fn decode_string(&mut self) -> Result<String>;

    /// Reads a container length prefix, checking it against `Options::max_container_len`.
    fn decode_len(&mut self) -> Result<usize> {
        let position = self.position();
        let len = self.decode_primitive::<usize>()?;
        self.options().check_len(len, position)
    }
}

/// Cursor bound to a traversal phase.
pub trait Transcode: Cursor {
    /// Phase performed by the cursor.
    const PHASE: Phase;

    /// Encodes `field` if the cursor is a writer, or decodes into it if the cursor is a reader.
    fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()>;
}

/// Writer of positional binary records.
#[derive(Debug)]
pub struct BinaryWriter<'m, S: ?Sized> {
    storage: &'m mut S,
    position: usize,
    options: Options,
}

impl<'m, S: ByteSink + ?Sized> BinaryWriter<'m, S> {
    /// Binds a writer to `storage` at `position`.
    pub fn new(storage: &'m mut S, position: usize, options: Options) -> Self {
        Self {
            storage,
            position,
            options,
        }
    }

    /// Writes `bytes` at the cursor, advancing it.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.window(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    fn window(&mut self, len: usize) -> Result<&mut [u8]> {
        let position = self.position;
        let window = self.storage.window_mut(position, len)?;
        self.position = position + len;
        Ok(window)
    }
}

impl<S: ByteSink + ?Sized> Cursor for BinaryWriter<'_, S> {
    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) {
        self.position = position;
    }

    fn options(&self) -> &Options {
        &self.options
    }
}

impl<S: ByteSink + ?Sized> Encoder for BinaryWriter<'_, S> {
    fn encode_primitive<P: Primitive>(&mut self, value: P) -> Result<()> {
        value.write_native(self.window(P::SIZE)?);
        Ok(())
    }

    fn encode_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.write(bytes)
    }

    fn encode_str(&mut self, value: &str) -> Result<()> {
        self.encode_len(value.len())?;
        self.write(value.as_bytes())
    }
}

impl<S: ByteSink + ?Sized> Transcode for BinaryWriter<'_, S> {
    const PHASE: Phase = Phase::Serialization;

    fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()> {
        field.encode(self)
    }
}

/// Reader of positional binary records.
#[derive(Debug)]
pub struct BinaryReader<'m> {
    bytes: &'m [u8],
    position: usize,
    options: Options,
}

impl<'m> BinaryReader<'m> {
    /// Binds a reader to `bytes` at `position`.
    pub fn new(bytes: &'m [u8], position: usize, options: Options) -> Self {
        Self {
            bytes,
            position,
            options,
        }
    }

    /// Reads `len` bytes at the cursor, advancing it.
    pub fn read(&mut self, len: usize) -> Result<&'m [u8]> {
        let bytes = self.bytes;
        let start = self.position;
        let chunk = start
            .checked_add(len)
            .and_then(|end| bytes.get(start..end))
            .ok_or_else(|| Error::out_of_range(start, len, bytes.len()))?;
        self.position = start + len;
        Ok(chunk)
    }

    /// Number of bytes after the cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }
}

impl Cursor for BinaryReader<'_> {
    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, position: usize) {
        self.position = position;
    }

    fn options(&self) -> &Options {
        &self.options
    }
}

impl Decoder for BinaryReader<'_> {
    fn decode_primitive<P: Primitive>(&mut self) -> Result<P> {
        let position = self.position;
        let bytes = self.read(P::SIZE)?;
        P::read_native(bytes, position)
    }

    fn decode_raw(&mut self, buffer: &mut [u8]) -> Result<()> {
        let bytes = self.read(buffer.len())?;
        buffer.copy_from_slice(bytes);
        Ok(())
    }

    fn decode_string(&mut self) -> Result<String> {
        let len = self.decode_len()?;
        let position = self.position;
        let bytes = self.read(len)?;
        str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|error| Error::Utf8 { position, error })
    }
}

impl Transcode for BinaryReader<'_> {
    const PHASE: Phase = Phase::Deserialization;

    fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()> {
        field.decode(self)
    }
}
