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

//! Binding of a host value to an ordered list of named field accessors.
//!
//! The bound value serializes and deserializes itself through the regular traversal,
//! which makes it a seam for code that produces field lists at run time or wraps
//! getters and setters instead of plain fields.
//!
//! # Examples
//!
//! ```
//! use exonum_fields::{bind, Member, Property};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Account {
//!     owner: String,
//!     balance: u64,
//! }
//!
//! impl Account {
//!     fn cents(&self) -> u64 {
//!         self.balance * 100
//!     }
//!
//!     fn set_cents(&mut self, cents: u64) {
//!         self.balance = cents / 100;
//!     }
//! }
//!
//! let accessors = (
//!     Member::<Account, String>::new("owner", |a| &a.owner, |a| &mut a.owner),
//!     Property::new("cents", Account::cents, Account::set_cents),
//! );
//!
//! let mut account = Account { owner: "alice".to_owned(), balance: 5 };
//! let mut buffer: Vec<u8> = Vec::new();
//! bind(&mut account, accessors).serialize(&mut buffer, 0).unwrap();
//!
//! let mut restored = Account::default();
//! bind(&mut restored, accessors).deserialize(&buffer, 0).unwrap();
//! assert_eq!(restored, account);
//! ```

use std::fmt;

use crate::{
    buffer::Memory,
    traversal::{deserialize_with, serialize_with, Context, Hook, Phase, PhaseHook},
    Field, Options, Result, Transcode,
};

/// Named access to one field of the host type `H`.
pub trait Accessor<H> {
    /// Name of the field.
    fn name(&self) -> &'static str;

    /// Encodes or decodes the field of `host`, depending on the phase of `cx`.
    fn transcode<T: Transcode>(&self, host: &mut H, cx: &mut Context<'_, T>) -> Result<()>;
}

/// Accessor to a field stored in the host.
pub struct Member<H, F> {
    name: &'static str,
    get: fn(&H) -> &F,
    get_mut: fn(&mut H) -> &mut F,
}

impl<H, F> Member<H, F> {
    /// Creates an accessor from a pair of projections.
    pub fn new(name: &'static str, get: fn(&H) -> &F, get_mut: fn(&mut H) -> &mut F) -> Self {
        Self { name, get, get_mut }
    }

    /// Returns a reference to the field of `host`.
    pub fn get<'h>(&self, host: &'h H) -> &'h F {
        (self.get)(host)
    }
}

impl<H, F> Clone for Member<H, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, F> Copy for Member<H, F> {}

impl<H, F> fmt::Debug for Member<H, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member").field("name", &self.name).finish()
    }
}

impl<H, F: Field> Accessor<H> for Member<H, F> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn transcode<T: Transcode>(&self, host: &mut H, cx: &mut Context<'_, T>) -> Result<()> {
        cx.transcode((self.get_mut)(host))
    }
}

/// Accessor to a value exposed through a getter and a setter.
///
/// On decode the value is read into `F::default()` and passed to the setter.
pub struct Property<H, F> {
    name: &'static str,
    get: fn(&H) -> F,
    set: fn(&mut H, F),
}

impl<H, F> Property<H, F> {
    /// Creates an accessor from a getter and a setter.
    pub fn new(name: &'static str, get: fn(&H) -> F, set: fn(&mut H, F)) -> Self {
        Self { name, get, set }
    }
}

impl<H, F> Clone for Property<H, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, F> Copy for Property<H, F> {}

impl<H, F> fmt::Debug for Property<H, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

impl<H, F: Field + Default> Accessor<H> for Property<H, F> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn transcode<T: Transcode>(&self, host: &mut H, cx: &mut Context<'_, T>) -> Result<()> {
        match cx.phase() {
            Phase::Serialization => cx.transcode(&mut (self.get)(host)),
            Phase::Deserialization => {
                let mut value = F::default();
                cx.transcode(&mut value)?;
                (self.set)(host, value);
                Ok(())
            }
        }
    }
}

/// Ordered list of accessors of the host type `H`.
pub trait Accessors<H> {
    /// Applies the accessors in order.
    fn transcode_all<T: Transcode>(&self, host: &mut H, cx: &mut Context<'_, T>) -> Result<()>;

    /// Names of the accessed fields, in order.
    fn names(&self) -> Vec<&'static str>;
}

macro_rules! implement_accessors {
    ($($name:ident: $index:tt),*) => {
        impl<Host, $($name: Accessor<Host>),*> Accessors<Host> for ($($name,)*) {
            #[allow(unused_variables)]
            fn transcode_all<T: Transcode>(
                &self,
                host: &mut Host,
                cx: &mut Context<'_, T>,
            ) -> Result<()> {
                $( self.$index.transcode(host, cx)?; )*
                Ok(())
            }

            fn names(&self) -> Vec<&'static str> {
                vec![$(self.$index.name()),*]
            }
        }
    };
}

implement_accessors!();
implement_accessors!(A: 0);
implement_accessors!(A: 0, B: 1);
implement_accessors!(A: 0, B: 1, C: 2);
implement_accessors!(A: 0, B: 1, C: 2, D: 3);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
implement_accessors!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

/// Host value bound to its accessors.
#[derive(Debug)]
pub struct Bound<'h, H, A> {
    host: &'h mut H,
    accessors: A,
}

/// Binds `host` to `accessors`.
pub fn bind<H, A: Accessors<H>>(host: &mut H, accessors: A) -> Bound<'_, H, A> {
    Bound { host, accessors }
}

impl<H, A: Accessors<H>> Bound<'_, H, A> {
    /// Names of the bound fields, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.accessors.names()
    }

    /// Encodes the host into `memory` at `position`, returning the next free position.
    pub fn serialize<M>(&mut self, memory: &mut M, position: usize) -> Result<usize>
    where
        M: Memory + ?Sized,
    {
        self.serialize_with(&Options::default(), memory, position)
    }

    /// Encodes the host with explicit options.
    pub fn serialize_with<M: Memory + ?Sized>(
        &mut self,
        options: &Options,
        memory: &mut M,
        position: usize,
    ) -> Result<usize> {
        serialize_with(options, memory, position, (Hook(self),))
    }

    /// Decodes the host from `memory` at `position`, returning the next free position.
    pub fn deserialize<M>(&mut self, memory: &M, position: usize) -> Result<usize>
    where
        M: Memory + ?Sized,
    {
        self.deserialize_with(&Options::default(), memory, position)
    }

    /// Decodes the host with explicit options.
    pub fn deserialize_with<M: Memory + ?Sized>(
        &mut self,
        options: &Options,
        memory: &M,
        position: usize,
    ) -> Result<usize> {
        deserialize_with(options, memory, position, (Hook(self),))
    }
}

impl<H, A: Accessors<H>> PhaseHook for Bound<'_, H, A> {
    fn call<T: Transcode>(&mut self, mut cx: Context<'_, T>) -> Result<()> {
        self.accessors.transcode_all(&mut *self.host, &mut cx)
    }
}
