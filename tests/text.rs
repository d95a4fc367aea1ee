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

//! Tests delimited text records.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use std::collections::{HashMap, VecDeque};

use exonum_fields::{
    chain, deserialize, deserialize_with, serializable, serialize, serialize_with, Context, Error,
    Hook, Options, PhaseHook, Result, Transcode,
};

serializable! {
    #[derive(Debug, Default, PartialEq)]
    struct Address {
        street: String,
        building: u16,
    }
}

serializable! {
    #[derive(Debug, Default, PartialEq)]
    struct Person {
        name: String,
        age: u8,
        height: f32,
        initial: char,
        address: Address,
        phones: Vec<String>,
        spouse: Option<Box<Address>>,
    }
}

fn person() -> Person {
    Person {
        name: "Ann, Jr.".to_owned(),
        age: 42,
        height: 1.68,
        initial: 'A',
        address: Address {
            street: "Main st., 7".to_owned(),
            building: 3,
        },
        phones: vec!["+1 555".to_owned(), String::new()],
        spouse: None,
    }
}

#[test]
fn nested_objects_are_inline() {
    let mut text = String::new();
    let end = serialize(&mut text, 0, (&person(),)).unwrap();
    assert_eq!(
        text,
        "8,Ann, Jr.,42,1.68,65,11,Main st., 7,3,2,6,+1 555,0,,false,"
    );
    assert_eq!(end, text.len());

    let mut restored = Person::default();
    assert_eq!(deserialize(&text, 0, (&mut restored,)).unwrap(), end);
    assert_eq!(restored, person());
}

#[test]
fn custom_delimiter() {
    let options = Options::default().with_delimiter('|');
    let mut original = person();
    original.spouse = Some(Box::new(Address {
        street: "Side | road".to_owned(),
        building: 9,
    }));

    let mut text = String::new();
    serialize_with(&options, &mut text, 0, (&original,)).unwrap();
    assert!(text.starts_with("8|Ann, Jr.|42|"));
    assert!(text.ends_with("|true|11|Side | road|9|"));

    let mut restored = Person::default();
    deserialize_with(&options, &text, 0, (&mut restored,)).unwrap();
    assert_eq!(restored, original);

    // The record cannot be read with another delimiter.
    let mut restored = Person::default();
    assert!(deserialize(&text, 0, (&mut restored,)).is_err());
}

#[test]
fn multiple_text_records() {
    let mut text = String::new();
    let p1 = serialize(&mut text, 0, (&1_u8, &"one".to_owned())).unwrap();
    let p2 = serialize(&mut text, p1, (&2_u8, &"two".to_owned())).unwrap();
    assert_eq!(text, "1,3,one,2,3,two,");
    assert_eq!(p2, text.len());

    let (mut n, mut s) = (0_u8, String::new());
    assert_eq!(deserialize(&text, p1, (&mut n, &mut s)).unwrap(), p2);
    assert_eq!((n, s.as_str()), (2, "two"));

    // The outermost call trims text as well.
    assert_eq!(serialize(&mut text, 0, (&9_u8,)).unwrap(), 2);
    assert_eq!(text, "9,");
}

#[test]
fn containers() {
    let queue: VecDeque<i64> = vec![-1, 0, 1].into_iter().collect();
    let map: HashMap<String, bool> = vec![("on".to_owned(), true)].into_iter().collect();
    let grid = [[1_u8, 2], [3, 4]];
    let mut text = String::new();
    serialize(&mut text, 0, (&queue, &map, &grid)).unwrap();
    assert_eq!(text, "3,-1,0,1,1,2,on,true,1,2,3,4,");

    let (mut queue2, mut map2, mut grid2) = (
        VecDeque::<i64>::new(),
        HashMap::<String, bool>::new(),
        [[0_u8; 2]; 2],
    );
    deserialize(&text, 0, (&mut queue2, &mut map2, &mut grid2)).unwrap();
    assert_eq!((queue2, map2, grid2), (queue, map, grid));
}

#[test]
fn chains_in_text() {
    let (x, y) = (1.5_f64, -2_i32);
    let mut text = String::new();
    serialize(&mut text, 0, (chain((&x, &y), "x, y").unwrap(),)).unwrap();
    assert_eq!(text, "1.5,-2,");

    let (mut x2, mut y2) = (0.0_f64, 0_i32);
    deserialize(&text, 0, (chain((&mut x2, &mut y2), "x, y").unwrap(),)).unwrap();
    assert_eq!((x2, y2), (x, y));
}

#[test]
fn malformed_text() {
    let mut age = 0_u8;
    assert_matches!(
        deserialize(&"300,".to_owned(), 0, (&mut age,)),
        Err(Error::IncorrectToken { position: 0, ref token }) if token == "300"
    );
    assert_matches!(
        deserialize(&"12".to_owned(), 0, (&mut age,)),
        Err(Error::UnterminatedToken { position: 0 })
    );
    assert_matches!(
        deserialize(&String::new(), 0, (&mut age,)),
        Err(Error::OutOfRange { position: 0, .. })
    );

    let mut flag = false;
    assert_matches!(
        deserialize(&"yes,".to_owned(), 0, (&mut flag,)),
        Err(Error::IncorrectToken { .. })
    );

    let mut name = String::new();
    assert_matches!(
        deserialize(&"10,short,".to_owned(), 0, (&mut name,)),
        Err(Error::OutOfRange { .. })
    );
}

/// Encodes a string and leaves the cursor inside its last character.
struct SplitCharacter;

impl PhaseHook for SplitCharacter {
    fn call<T: Transcode>(&mut self, mut cx: Context<'_, T>) -> Result<()> {
        cx.transcode(&mut "\u{e9}".to_owned())?;
        let position = cx.position();
        cx.seek(position - 2);
        Ok(())
    }
}

#[test]
fn record_end_inside_character_is_rejected() {
    let mut text = String::new();
    assert_matches!(
        serialize(&mut text, 0, (Hook(SplitCharacter),)),
        Err(Error::Custom(_))
    );
    assert_eq!(text, "2,\u{e9},");
}
