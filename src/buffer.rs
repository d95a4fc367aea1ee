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

//! Memories that records are written to and read from.
//!
//! The type of the memory selects the record format: byte storages hold positional
//! binary records, `String` holds delimited text records.

use std::cmp;

use crate::{
    cursor::{BinaryReader, BinaryWriter, Decoder, Encoder, Transcode},
    text::{TextReader, TextWriter},
    Error, Options, Result,
};

/// Linear byte storage addressed by a cursor.
pub trait ByteSink {
    /// Returns the stored bytes.
    fn as_bytes(&self) -> &[u8];

    /// Returns the writable window `[position, position + len)`, growing the storage
    /// if it supports growth.
    fn window_mut(&mut self, position: usize, len: usize) -> Result<&mut [u8]>;
}

fn window_end(position: usize, len: usize) -> Result<usize> {
    position
        .checked_add(len)
        .ok_or_else(|| Error::out_of_range(position, len, 0))
}

impl ByteSink for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn window_mut(&mut self, position: usize, len: usize) -> Result<&mut [u8]> {
        let end = window_end(position, len)?;
        if end > self.len() {
            self.resize(end, 0);
        }
        Ok(&mut self[position..end])
    }
}

/// Fixed-size storage: writing past the end fails with `Error::OutOfRange`.
impl ByteSink for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn window_mut(&mut self, position: usize, len: usize) -> Result<&mut [u8]> {
        let end = window_end(position, len)?;
        let total = self.len();
        self.get_mut(position..end)
            .ok_or_else(|| Error::out_of_range(position, len, total))
    }
}

/// Growable byte buffer that keeps its length across records.
///
/// Unlike `Vec<u8>`, `Bytes` is never trimmed by the outermost `serialize` call: its
/// length is the furthest position ever written, and the storage grows by doubling.
/// Use the position returned by `serialize` to find the end of the last record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes {
    data: Vec<u8>,
    len: usize,
}

impl Bytes {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with `capacity` preallocated bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Number of written bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes that can be written without reallocation.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Forgets the written bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Converts the buffer into a vector of the written bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        let len = data.len();
        Self { data, len }
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl ByteSink for Bytes {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn window_mut(&mut self, position: usize, len: usize) -> Result<&mut [u8]> {
        let end = window_end(position, len)?;
        if end > self.data.len() {
            let grown = cmp::max(end, self.data.len() * 2);
            self.data.resize(grown, 0);
        }
        self.len = cmp::max(self.len, end);
        Ok(&mut self.data[position..end])
    }
}

/// Memory holding records, mapped to the cursors of its record format.
pub trait Memory {
    /// Cursor writing records into the memory.
    type Writer<'m>: Encoder + Transcode
    where
        Self: 'm;
    /// Cursor reading records from the memory.
    type Reader<'m>: Decoder + Transcode
    where
        Self: 'm;

    /// Binds a writer at `position`.
    fn writer(&mut self, position: usize, options: Options) -> Self::Writer<'_>;

    /// Binds a reader at `position`.
    fn reader(&self, position: usize, options: Options) -> Self::Reader<'_>;

    /// Shrinks the memory to `len`, if it supports resizing.
    fn trim(&mut self, len: usize) -> Result<()>;
}

impl Memory for Vec<u8> {
    type Writer<'m> = BinaryWriter<'m, Vec<u8>> where Self: 'm;
    type Reader<'m> = BinaryReader<'m> where Self: 'm;

    fn writer(&mut self, position: usize, options: Options) -> Self::Writer<'_> {
        BinaryWriter::new(self, position, options)
    }

    fn reader(&self, position: usize, options: Options) -> Self::Reader<'_> {
        BinaryReader::new(self, position, options)
    }

    fn trim(&mut self, len: usize) -> Result<()> {
        self.resize(len, 0);
        Ok(())
    }
}

impl Memory for [u8] {
    type Writer<'m> = BinaryWriter<'m, [u8]> where Self: 'm;
    type Reader<'m> = BinaryReader<'m> where Self: 'm;

    fn writer(&mut self, position: usize, options: Options) -> Self::Writer<'_> {
        BinaryWriter::new(self, position, options)
    }

    fn reader(&self, position: usize, options: Options) -> Self::Reader<'_> {
        BinaryReader::new(self, position, options)
    }

    fn trim(&mut self, _len: usize) -> Result<()> {
        Ok(())
    }
}

impl Memory for Bytes {
    type Writer<'m> = BinaryWriter<'m, Bytes> where Self: 'm;
    type Reader<'m> = BinaryReader<'m> where Self: 'm;

    fn writer(&mut self, position: usize, options: Options) -> Self::Writer<'_> {
        BinaryWriter::new(self, position, options)
    }

    fn reader(&self, position: usize, options: Options) -> Self::Reader<'_> {
        BinaryReader::new(self.as_slice(), position, options)
    }

    fn trim(&mut self, _len: usize) -> Result<()> {
        Ok(())
    }
}

impl Memory for String {
    type Writer<'m> = TextWriter<'m> where Self: 'm;
    type Reader<'m> = TextReader<'m> where Self: 'm;

    fn writer(&mut self, position: usize, options: Options) -> Self::Writer<'_> {
        TextWriter::new(self, position, options)
    }

    fn reader(&self, position: usize, options: Options) -> Self::Reader<'_> {
        TextReader::new(self, position, options)
    }

    fn trim(&mut self, len: usize) -> Result<()> {
        if !self.is_char_boundary(len) {
            return Err(Error::custom("text position splits a character"));
        }
        self.truncate(len);
        Ok(())
    }
}
