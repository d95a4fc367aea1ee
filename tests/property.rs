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

//! Property testing for records of arbitrary field values.

use proptest::{
    collection::{btree_map, vec},
    num, option, prop_assert, prop_assert_eq, proptest,
    strategy::Strategy,
    test_runner::TestCaseResult,
};

use std::fmt::Debug;

use exonum_fields::{deserialize, serializable, serialize, Field, Memory};

serializable! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Entry {
        key: String,
        tags: Vec<String>,
        weight: f64,
        flags: [bool; 3],
        parent: Option<Box<Entry>>,
    }
}

fn entry() -> impl Strategy<Value = Entry> {
    let leaf = (
        ".*",
        vec(".{0,8}", 0..4),
        num::f64::NORMAL | num::f64::ZERO,
        proptest::array::uniform3(proptest::bool::ANY),
    );
    (leaf.clone(), option::of(leaf)).prop_map(|(head, parent)| {
        let make = |(key, tags, weight, flags): (String, Vec<String>, f64, [bool; 3])| Entry {
            key,
            tags,
            weight,
            flags,
            parent: None,
        };
        let mut entry = make(head);
        entry.parent = parent.map(|parent| Box::new(make(parent)));
        entry
    })
}

fn check_round_trip<M, T>(mut memory: M, value: &T) -> TestCaseResult
where
    M: Memory,
    T: Field + Default + PartialEq + Debug,
{
    let end = serialize(&mut memory, 0, (value,))?;
    let mut restored = T::default();
    prop_assert_eq!(deserialize(&memory, 0, (&mut restored,))?, end);
    prop_assert_eq!(&restored, value);
    Ok(())
}

fn check_prefixes_fail<T>(value: &T) -> TestCaseResult
where
    T: Field + Default,
{
    let mut buffer: Vec<u8> = Vec::new();
    let end = serialize(&mut buffer, 0, (value,))?;
    for len in 0..end {
        let mut restored = T::default();
        prop_assert!(deserialize(&buffer[..len], 0, (&mut restored,)).is_err());
    }
    Ok(())
}

proptest! {
    #[test]
    fn binary_round_trip(value in entry()) {
        check_round_trip(Vec::<u8>::new(), &value)?;
    }

    #[test]
    fn text_round_trip(value in entry()) {
        check_round_trip(String::new(), &value)?;
    }

    #[test]
    fn maps_round_trip(map in btree_map(proptest::num::i32::ANY, ".*", 0..8)) {
        check_round_trip(Vec::<u8>::new(), &map)?;
        check_round_trip(String::new(), &map)?;
    }

    #[test]
    fn nested_vectors_round_trip(items in vec(vec(proptest::num::u16::ANY, 0..5), 0..5)) {
        check_round_trip(Vec::<u8>::new(), &items)?;
        check_round_trip(String::new(), &items)?;
    }

    #[test]
    fn truncated_records_fail(value in entry()) {
        check_prefixes_fail(&value)?;
    }

    #[test]
    fn records_concatenate(first in entry(), second in entry()) {
        let mut buffer: Vec<u8> = Vec::new();
        let p1 = serialize(&mut buffer, 0, (&first,))?;
        let p2 = serialize(&mut buffer, p1, (&second,))?;
        prop_assert_eq!(p2, buffer.len());

        let (mut a, mut b) = (Entry::default(), Entry::default());
        prop_assert_eq!(deserialize(&buffer, 0, (&mut a, &mut b))?, p2);
        prop_assert_eq!((a, b), (first, second));
    }
}
