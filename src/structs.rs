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

//! Struct fast path: whole POD values copied without a field chain.

use bytemuck::Pod;
use log::trace;

use std::mem::size_of;

use crate::{buffer::ByteSink, Error, Result};

/// Copies the in-memory representation of `value` into `memory` at `position`.
///
/// Returns the position after the copied bytes. The memory is never trimmed.
///
/// # Examples
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use exonum_fields::{deserialize_struct, serialize_struct};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
/// #[repr(C)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut buffer: Vec<u8> = Vec::new();
/// let end = serialize_struct(&mut buffer, 0, &Point { x: 7, y: -3 }).unwrap();
/// assert_eq!(end, 8);
///
/// let mut point = Point { x: 0, y: 0 };
/// deserialize_struct(&buffer, 0, &mut point).unwrap();
/// assert_eq!(point, Point { x: 7, y: -3 });
/// ```
pub fn serialize_struct<S, T>(memory: &mut S, position: usize, value: &T) -> Result<usize>
where
    S: ByteSink + ?Sized,
    T: Pod,
{
    let bytes = bytemuck::bytes_of(value);
    memory
        .window_mut(position, bytes.len())?
        .copy_from_slice(bytes);
    trace!("Copied {} struct byte(s) to position {}", bytes.len(), position);
    Ok(position + bytes.len())
}

/// Copies `size_of::<T>()` bytes at `position` in `memory` into `value`.
///
/// Returns the position after the copied bytes. `value` is untouched if the memory
/// is too short.
pub fn deserialize_struct<S, T>(memory: &S, position: usize, value: &mut T) -> Result<usize>
where
    S: ByteSink + ?Sized,
    T: Pod,
{
    let bytes = memory.as_bytes();
    let size = size_of::<T>();
    let chunk = position
        .checked_add(size)
        .and_then(|end| bytes.get(position..end))
        .ok_or_else(|| Error::out_of_range(position, size, bytes.len()))?;
    bytemuck::bytes_of_mut(value).copy_from_slice(chunk);
    trace!("Copied {} struct byte(s) from position {}", size, position);
    Ok(position + size)
}
