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

//! Cursors of the delimited text record format.
//!
//! Every primitive is a token followed by the delimiter. Strings are framed by their
//! length in bytes: `<len><delimiter><text><delimiter>`, so they may contain the delimiter
//! themselves. Raw aggregates are written as a hex token.

use crate::{
    cursor::{Cursor, Decoder, Encoder, Transcode},
    primitives::Primitive,
    traversal::Phase,
    Error, Field, Options, Result,
};

/// Writer of delimited text records.
#[derive(Debug)]
pub struct TextWriter<'m> {
    text: &'m mut String,
    position: usize,
    options: Options,
}

impl<'m> TextWriter<'m> {
    /// Binds a writer to `text` at `position`.
    pub fn new(text: &'m mut String, position: usize, options: Options) -> Self {
        Self {
            text,
            position,
            options,
        }
    }

    /// Writes `chunk` at the cursor, advancing it.
    ///
    /// Writing inside the existing text overwrites it. The cursor may not be past the
    /// end of the text or inside a multi-byte character.
    pub fn write(&mut self, chunk: &str) -> Result<()> {
        let position = self.position;
        let len = self.text.len();
        if position == len {
            self.text.push_str(chunk);
        } else if position < len {
            let end = len.min(position + chunk.len());
            if !self.text.is_char_boundary(position) || !self.text.is_char_boundary(end) {
                return Err(Error::custom("text position splits a character"));
            }
            self.text.replace_range(position..end, chunk);
        } else {
            return Err(Error::out_of_range(position, chunk.len(), len));
        }
        self.position = position + chunk.len();
        Ok(())
    }

    fn write_token(&mut self, mut token: String) -> Result<()> {
        token.push(self.options.delimiter);
        self.write(&token)
    }
}

impl Cursor for TextWriter<'_> {
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

impl Encoder for TextWriter<'_> {
    fn encode_primitive<P: Primitive>(&mut self, value: P) -> Result<()> {
        let mut token = String::new();
        value.write_token(&mut token);
        self.write_token(token)
    }

    fn encode_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_token(hex::encode(bytes))
    }

    fn encode_str(&mut self, value: &str) -> Result<()> {
        self.encode_len(value.len())?;
        self.write_token(value.to_owned())
    }
}

impl Transcode for TextWriter<'_> {
    const PHASE: Phase = Phase::Serialization;

    fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()> {
        field.encode(self)
    }
}

/// Reader of delimited text records.
#[derive(Debug)]
pub struct TextReader<'m> {
    text: &'m str,
    position: usize,
    options: Options,
}

impl<'m> TextReader<'m> {
    /// Binds a reader to `text` at `position`.
    pub fn new(text: &'m str, position: usize, options: Options) -> Self {
        Self {
            text,
            position,
            options,
        }
    }

    /// Reads the next token, advancing the cursor past its delimiter.
    pub fn next_token(&mut self) -> Result<&'m str> {
        let text = self.text;
        let start = self.position;
        let rest = text
            .get(start..)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| Error::out_of_range(start, 1, text.len()))?;
        let delimiter = self.options.delimiter;
        let end = rest
            .find(delimiter)
            .ok_or(Error::UnterminatedToken { position: start })?;
        self.position = start + end + delimiter.len_utf8();
        Ok(&rest[..end])
    }

    fn expect_delimiter(&mut self) -> Result<()> {
        let position = self.position;
        let delimiter = self.options.delimiter;
        match self.text.get(position..).and_then(|rest| rest.chars().next()) {
            Some(c) if c == delimiter => {
                self.position += delimiter.len_utf8();
                Ok(())
            }
            Some(c) => Err(Error::IncorrectToken {
                position,
                token: c.to_string(),
            }),
            None => Err(Error::UnterminatedToken { position }),
        }
    }
}

impl Cursor for TextReader<'_> {
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

impl Decoder for TextReader<'_> {
    fn decode_primitive<P: Primitive>(&mut self) -> Result<P> {
        let position = self.position;
        let token = self.next_token()?;
        P::parse_token(token, position)
    }

    fn decode_raw(&mut self, buffer: &mut [u8]) -> Result<()> {
        let position = self.position;
        let token = self.next_token()?;
        hex::decode_to_slice(token, buffer).map_err(|_| Error::IncorrectToken {
            position,
            token: token.to_owned(),
        })
    }

    fn decode_string(&mut self) -> Result<String> {
        let len = self.decode_len()?;
        let start = self.position;
        let text = self.text;
        let value = start
            .checked_add(len)
            .and_then(|end| text.get(start..end))
            .ok_or_else(|| {
                if len > text.len().saturating_sub(start) {
                    Error::out_of_range(start, len, text.len())
                } else {
                    Error::IncorrectToken {
                        position: start,
                        token: String::new(),
                    }
                }
            })?;
        self.position = start + len;
        self.expect_delimiter()?;
        Ok(value.to_owned())
    }
}

impl Transcode for TextReader<'_> {
    const PHASE: Phase = Phase::Deserialization;

    fn transcode<F: Field>(&mut self, field: &mut F) -> Result<()> {
        field.decode(self)
    }
}
