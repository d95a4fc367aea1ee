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

//! Settings of the serialization engine.

use serde_derive::{Deserialize, Serialize};

use crate::{Error, Result};

/// Options for encoding and decoding records.
///
/// Options may be loaded from any serde-compatible configuration source; missing
/// entries fall back to their defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    /// Character separating tokens in text records.
    ///
    /// Alphanumeric characters and `-`, `+`, `.` occur inside tokens and are rejected.
    ///
    /// Defaults to `','`.
    pub delimiter: char,
    /// Whether the outermost `serialize` call shrinks a resizable memory
    /// to the final cursor position.
    ///
    /// Defaults to `true`.
    pub trim_top_level: bool,
    /// Upper bound for every decoded length prefix (strings, sequences, sets and maps).
    ///
    /// Defaults to `None`, meaning that lengths are unbounded.
    pub max_container_len: Option<usize>,
}

impl Options {
    /// Creates a new `Options` object.
    pub fn new(delimiter: char, trim_top_level: bool, max_container_len: Option<usize>) -> Self {
        Self {
            delimiter,
            trim_top_level,
            max_container_len,
        }
    }

    /// Returns a copy of these options with another text delimiter.
    pub fn with_delimiter(self, delimiter: char) -> Self {
        Self { delimiter, ..self }
    }

    /// Returns a copy of these options with a limit on decoded lengths.
    pub fn with_max_container_len(self, limit: usize) -> Self {
        Self {
            max_container_len: Some(limit),
            ..self
        }
    }

    /// Checks that the options are usable.
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.delimiter;
        if delimiter.is_alphanumeric() || matches!(delimiter, '-' | '+' | '.') {
            return Err(Error::InvalidDelimiter(delimiter));
        }
        Ok(())
    }

    pub(crate) fn check_len(&self, len: usize, position: usize) -> Result<usize> {
        match self.max_container_len {
            Some(limit) if len > limit => Err(Error::LengthLimit {
                position,
                len,
                limit,
            }),
            _ => Ok(len),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(',', true, None)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn options_from_partial_json() {
        let options: Options = serde_json::from_str(r#"{ "delimiter": ";" }"#).unwrap();
        assert_eq!(options, Options::default().with_delimiter(';'));

        let options: Options =
            serde_json::from_str(r#"{ "trim_top_level": false, "max_container_len": 16 }"#)
                .unwrap();
        assert_eq!(options, Options::new(',', false, Some(16)));
    }

    #[test]
    fn options_json_roundtrip() {
        let options = Options::new('|', false, Some(1024));
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(serde_json::from_str::<Options>(&json).unwrap(), options);
    }

    #[test]
    fn delimiter_validation() {
        assert!(Options::default().validate().is_ok());
        assert!(Options::default().with_delimiter('\t').validate().is_ok());
        for &delimiter in &['a', '7', '-', '+', '.'] {
            assert_matches!(
                Options::default().with_delimiter(delimiter).validate(),
                Err(Error::InvalidDelimiter(c)) if c == delimiter
            );
        }
    }

    #[test]
    fn length_limit() {
        let options = Options::default().with_max_container_len(3);
        assert_eq!(options.check_len(3, 0).unwrap(), 3);
        assert_matches!(
            options.check_len(4, 10),
            Err(Error::LengthLimit {
                position: 10,
                len: 4,
                limit: 3
            })
        );
        assert_eq!(Options::default().check_len(usize::max_value(), 0).unwrap(), usize::max_value());
    }
}
