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

//! Macros registering user types as fields.

/// Registers the fields of a struct, implementing `Serializable` and `Field` for it.
///
/// The macro either defines the struct itself or, with the `impl` form, registers
/// an existing one. Fields are encoded in the listed order; the registered type may be
/// used as a nested field of other records.
///
/// ```
/// use exonum_fields::{deserialize, serializable, serialize, FieldChain, Serializable};
///
/// serializable! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Wallet {
///         pub owner: String,
///         pub balance: u64,
///     }
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Transfer {
///     from: Wallet,
///     to: Wallet,
///     amount: u64,
/// }
///
/// serializable!(impl Transfer { from: Wallet, to: Wallet, amount: u64 });
///
/// let transfer = Transfer {
///     from: Wallet { owner: "alice".to_owned(), balance: 10 },
///     to: Wallet { owner: "bob".to_owned(), balance: 0 },
///     amount: 5,
/// };
/// let names: Vec<_> = transfer.fields().layout().iter().map(|f| f.name).collect();
/// assert_eq!(names, ["from", "to", "amount"]);
///
/// let mut text = String::new();
/// serialize(&mut text, 0, (&transfer,)).unwrap();
/// assert_eq!(text, "5,alice,10,3,bob,0,5,");
///
/// let mut restored = Transfer::default();
/// deserialize(&text, 0, (&mut restored,)).unwrap();
/// assert_eq!(restored, transfer);
/// ```
#[macro_export]
macro_rules! serializable {
    (impl $name:ident { $($field:ident : $type:ty),* $(,)? }) => {
        impl $crate::Serializable for $name {
            type Fields<'a> = $crate::__field_chain_type!(@ref 'a; $($type),*) where Self: 'a;
            type FieldsMut<'a> = $crate::__field_chain_type!(@mut 'a; $($type),*) where Self: 'a;

            fn fields(&self) -> Self::Fields<'_> {
                $crate::__field_chain!(@ref self; $($field),*)
            }

            fn fields_mut(&mut self) -> Self::FieldsMut<'_> {
                $crate::__field_chain!(@mut self; $($field),*)
            }
        }

        impl $crate::Field for $name {
            const CATEGORY: $crate::Category = $crate::Category::Nested;

            fn encode<E: $crate::Encoder>(&self, encoder: &mut E) -> $crate::Result<()> {
                $crate::encode_nested(self, encoder)
            }

            fn decode<D: $crate::Decoder>(&mut self, decoder: &mut D) -> $crate::Result<()> {
                $crate::decode_nested(self, decoder)
            }
        }
    };
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $($(#[$field_attr:meta])* $field_vis:vis $field:ident : $type:ty),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $($(#[$field_attr])* $field_vis $field: $type),*
        }

        $crate::serializable!(impl $name { $($field: $type),* });
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_chain_type {
    (@ref $lt:lifetime;) => { $crate::Nil };
    (@ref $lt:lifetime; $head:ty $(, $tail:ty)*) => {
        $crate::Node<&$lt $head, $crate::__field_chain_type!(@ref $lt; $($tail),*)>
    };
    (@mut $lt:lifetime;) => { $crate::Nil };
    (@mut $lt:lifetime; $head:ty $(, $tail:ty)*) => {
        $crate::Node<&$lt mut $head, $crate::__field_chain_type!(@mut $lt; $($tail),*)>
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_chain {
    (@ref $this:ident;) => { $crate::Nil };
    (@ref $this:ident; $head:ident $(, $tail:ident)*) => {
        $crate::Node::new(
            stringify!($head),
            &$this.$head,
            $crate::__field_chain!(@ref $this; $($tail),*),
        )
    };
    (@mut $this:ident;) => { $crate::Nil };
    (@mut $this:ident; $head:ident $(, $tail:ident)*) => {
        $crate::Node::new(
            stringify!($head),
            &mut $this.$head,
            $crate::__field_chain!(@mut $this; $($tail),*),
        )
    };
}

/// Implements `Field` for POD types, encoding them as raw aggregates.
///
/// The types must implement `bytemuck::Pod`. Use the `Raw` wrapper for foreign types.
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use exonum_fields::{implement_raw_field, serialize, Category, Field};
///
/// #[derive(Debug, Clone, Copy, Pod, Zeroable)]
/// #[repr(C)]
/// struct Rgb {
///     r: u8,
///     g: u8,
///     b: u8,
/// }
///
/// implement_raw_field!(Rgb);
///
/// assert_eq!(Rgb::CATEGORY, Category::Raw);
/// let mut buffer: Vec<u8> = Vec::new();
/// serialize(&mut buffer, 0, (&Rgb { r: 1, g: 2, b: 3 },)).unwrap();
/// assert_eq!(buffer, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! implement_raw_field {
    ($($type:ty),* $(,)?) => {
        $(
            impl $crate::Field for $type {
                const CATEGORY: $crate::Category = $crate::Category::Raw;

                fn encode<E: $crate::Encoder>(&self, encoder: &mut E) -> $crate::Result<()> {
                    $crate::encode_pod(self, encoder)
                }

                fn decode<D: $crate::Decoder>(&mut self, decoder: &mut D) -> $crate::Result<()> {
                    $crate::decode_pod(self, decoder)
                }
            }
        )*
    };
}
