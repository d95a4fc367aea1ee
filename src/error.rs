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

//! An implementation of `Error` type.

use thiserror::Error;

use std::{borrow::Cow, str::Utf8Error};

/// Errors raised while encoding or decoding a record.
///
/// A record carries no type tags, so decoding it with a field sequence different from
/// the one used for encoding is not detected as such. It may surface as any of the errors
/// below or produce garbage values.
#[derive(Debug, Error)]
pub enum Error {
    /// Not enough data in the buffer, or a write past the end of a fixed-size memory.
    #[error("{requested} byte(s) requested at position {position}, but only {available} available")]
    OutOfRange {
        /// Position of the cursor.
        position: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes left after the cursor.
        available: usize,
    },
    /// A text token is not followed by a delimiter.
    #[error("unterminated token at position {position}")]
    UnterminatedToken {
        /// Position of the token start.
        position: usize,
    },
    /// A text token cannot be parsed as the expected value.
    #[error("incorrect token `{token}` at position {position}")]
    IncorrectToken {
        /// Position of the token start.
        position: usize,
        /// The offending token.
        token: String,
    },
    /// A byte other than `0` or `1` is decoded as `bool`.
    #[error("incorrect boolean value {value} at position {position}")]
    IncorrectBoolean {
        /// Position of the byte.
        position: usize,
        /// The offending byte.
        value: u8,
    },
    /// A value is not a valid Unicode scalar value.
    #[error("incorrect char code point {value:#x} at position {position}")]
    IncorrectChar {
        /// Position of the value.
        position: usize,
        /// The offending code point.
        value: u32,
    },
    /// String data is not valid UTF-8.
    #[error("invalid utf-8 sequence at position {position}: {error}")]
    Utf8 {
        /// Position of the string data.
        position: usize,
        /// Error returned by the UTF-8 check.
        #[source]
        error: Utf8Error,
    },
    /// A decoded length prefix exceeds the configured limit.
    #[error("length {len} at position {position} exceeds the limit of {limit}")]
    LengthLimit {
        /// Position of the length prefix.
        position: usize,
        /// Decoded length.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
    /// The identifier list names a different number of fields than references supplied.
    #[error("expected {expected} field name(s), found {found}")]
    FieldNames {
        /// Number of field references.
        expected: usize,
        /// Number of names in the identifier list.
        found: usize,
    },
    /// The delimiter can occur inside text tokens.
    #[error("`{0}` cannot be used as a text delimiter")]
    InvalidDelimiter(char),
    /// Error raised by custom field logic.
    #[error("{0}")]
    Custom(Cow<'static, str>),
}

impl Error {
    /// Creates a custom error with the given description.
    pub fn custom<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Error::Custom(message.into())
    }

    pub(crate) fn out_of_range(position: usize, requested: usize, len: usize) -> Self {
        Error::OutOfRange {
            position,
            requested,
            available: len.saturating_sub(position),
        }
    }
}

impl From<&'static str> for Error {
    fn from(message: &'static str) -> Self {
        Error::custom(message)
    }
}
