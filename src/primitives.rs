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

//! A definition of `Primitive` trait and implementations for scalar types.

use byteorder::{ByteOrder, NativeEndian};

use std::mem::size_of;

use crate::{Error, Result};

/// A scalar value with a fixed-size binary form and a text token form.
///
/// The binary form is the native in-memory representation, so records are not
/// portable across platforms with different byte order or word size.
pub trait Primitive: Copy + Default + 'static {
    /// Size of the binary form in bytes.
    const SIZE: usize;

    /// Writes the native representation into `buffer`, which is exactly `SIZE` bytes long.
    fn write_native(self, buffer: &mut [u8]);

    /// Reads the value from `buffer`, which is exactly `SIZE` bytes long.
    ///
    /// `position` is used for error reporting only.
    fn read_native(buffer: &[u8], position: usize) -> Result<Self>;

    /// Appends the text token of the value to `out`.
    fn write_token(self, out: &mut String);

    /// Parses the value from a text token.
    fn parse_token(token: &str, position: usize) -> Result<Self>;
}

fn incorrect_token(token: &str, position: usize) -> Error {
    Error::IncorrectToken {
        position,
        token: token.to_owned(),
    }
}

macro_rules! implement_token {
    () => {
        fn write_token(self, out: &mut String) {
            out.push_str(&self.to_string());
        }

        fn parse_token(token: &str, position: usize) -> Result<Self> {
            token.parse().map_err(|_| incorrect_token(token, position))
        }
    };
}

macro_rules! implement_primitive {
    ($type:ty, $read:ident, $write:ident) => {
        impl Primitive for $type {
            const SIZE: usize = size_of::<$type>();

            fn write_native(self, buffer: &mut [u8]) {
                NativeEndian::$write(buffer, self);
            }

            fn read_native(buffer: &[u8], _position: usize) -> Result<Self> {
                Ok(NativeEndian::$read(buffer))
            }

            implement_token!();
        }
    };
    ($type:ty, $read_32:ident, $write_32:ident, $type_32:ty, $read_64:ident, $write_64:ident, $type_64:ty) => {
        impl Primitive for $type {
            const SIZE: usize = size_of::<$type>();

            #[cfg(target_pointer_width = "32")]
            fn write_native(self, buffer: &mut [u8]) {
                NativeEndian::$write_32(buffer, self as $type_32);
            }

            #[cfg(target_pointer_width = "64")]
            fn write_native(self, buffer: &mut [u8]) {
                NativeEndian::$write_64(buffer, self as $type_64);
            }

            #[cfg(target_pointer_width = "32")]
            fn read_native(buffer: &[u8], _position: usize) -> Result<Self> {
                Ok(NativeEndian::$read_32(buffer) as $type)
            }

            #[cfg(target_pointer_width = "64")]
            fn read_native(buffer: &[u8], _position: usize) -> Result<Self> {
                Ok(NativeEndian::$read_64(buffer) as $type)
            }

            implement_token!();
        }
    };
}

impl Primitive for u8 {
    const SIZE: usize = 1;

    fn write_native(self, buffer: &mut [u8]) {
        buffer[0] = self;
    }

    fn read_native(buffer: &[u8], _position: usize) -> Result<Self> {
        Ok(buffer[0])
    }

    implement_token!();
}

impl Primitive for i8 {
    const SIZE: usize = 1;

    fn write_native(self, buffer: &mut [u8]) {
        buffer[0] = self as u8;
    }

    fn read_native(buffer: &[u8], _position: usize) -> Result<Self> {
        Ok(buffer[0] as i8)
    }

    implement_token!();
}

implement_primitive! { u16, read_u16, write_u16 }
implement_primitive! { u32, read_u32, write_u32 }
implement_primitive! { u64, read_u64, write_u64 }
implement_primitive! { u128, read_u128, write_u128 }
implement_primitive! { i16, read_i16, write_i16 }
implement_primitive! { i32, read_i32, write_i32 }
implement_primitive! { i64, read_i64, write_i64 }
implement_primitive! { i128, read_i128, write_i128 }
implement_primitive! { f32, read_f32, write_f32 }
implement_primitive! { f64, read_f64, write_f64 }
// Platform-related types
implement_primitive! { usize, read_u32, write_u32, u32, read_u64, write_u64, u64 }
implement_primitive! { isize, read_i32, write_i32, i32, read_i64, write_i64, i64 }

/// Stored as a byte, with `0x01` denoting `true` and `0x00` denoting `false`.
impl Primitive for bool {
    const SIZE: usize = 1;

    fn write_native(self, buffer: &mut [u8]) {
        buffer[0] = self as u8;
    }

    fn read_native(buffer: &[u8], position: usize) -> Result<Self> {
        match buffer[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(Error::IncorrectBoolean { position, value }),
        }
    }

    implement_token!();
}

/// Stored as the `u32` code point, in both binary and text form.
///
/// The numeric text form keeps characters such as the delimiter out of the record.
impl Primitive for char {
    const SIZE: usize = 4;

    fn write_native(self, buffer: &mut [u8]) {
        NativeEndian::write_u32(buffer, self as u32);
    }

    fn read_native(buffer: &[u8], position: usize) -> Result<Self> {
        let value = NativeEndian::read_u32(buffer);
        std::char::from_u32(value).ok_or(Error::IncorrectChar { position, value })
    }

    fn write_token(self, out: &mut String) {
        (self as u32).write_token(out);
    }

    fn parse_token(token: &str, position: usize) -> Result<Self> {
        let value = u32::parse_token(token, position)?;
        std::char::from_u32(value).ok_or(Error::IncorrectChar { position, value })
    }
}
