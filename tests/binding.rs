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

//! Tests binding of hosts with private state to accessor lists.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use exonum_fields::{
    bind, deserialize, serializable, serialize, Error, Hook, Member, Options, Property,
};

serializable! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Limits {
        low: i16,
        high: i16,
    }
}

/// Host exposing its state only through methods.
#[derive(Debug, Default, PartialEq)]
struct Thermostat {
    name: String,
    limits: Limits,
    target: i16,
    history: Vec<i16>,
    setter_calls: usize,
}

impl Thermostat {
    fn new(name: &str, target: i16) -> Self {
        Self {
            name: name.to_owned(),
            limits: Limits { low: 5, high: 30 },
            target,
            history: vec![target],
            setter_calls: 0,
        }
    }

    fn target(&self) -> i16 {
        self.target
    }

    fn set_target(&mut self, target: i16) {
        self.setter_calls += 1;
        self.target = target.max(self.limits.low).min(self.limits.high);
    }

    fn history(&self) -> Vec<i16> {
        self.history.clone()
    }

    fn set_history(&mut self, history: Vec<i16>) {
        self.setter_calls += 1;
        self.history = history;
    }
}

type ThermostatAccessors = (
    Member<Thermostat, String>,
    Member<Thermostat, Limits>,
    Property<Thermostat, i16>,
    Property<Thermostat, Vec<i16>>,
);

fn accessors() -> ThermostatAccessors {
    (
        Member::new("name", |t| &t.name, |t| &mut t.name),
        Member::new("limits", |t| &t.limits, |t| &mut t.limits),
        Property::new("target", Thermostat::target, Thermostat::set_target),
        Property::new("history", Thermostat::history, Thermostat::set_history),
    )
}

#[test]
fn names_follow_accessor_order() {
    let mut thermostat = Thermostat::default();
    assert_eq!(
        bind(&mut thermostat, accessors()).names(),
        vec!["name", "limits", "target", "history"]
    );
}

#[test]
fn text_round_trip_goes_through_setters() {
    let mut thermostat = Thermostat::new("hall", 21);
    let mut text = String::new();
    let end = bind(&mut thermostat, accessors())
        .serialize(&mut text, 0)
        .unwrap();
    assert_eq!(text, "4,hall,5,30,21,1,21,");
    assert_eq!(end, text.len());
    assert_eq!(thermostat.setter_calls, 0);

    let mut restored = Thermostat::default();
    bind(&mut restored, accessors())
        .deserialize(&text, 0)
        .unwrap();
    // Members are decoded first, so the setter clamps against the decoded limits.
    assert_eq!(restored.setter_calls, 2);
    assert_eq!((restored.target, restored.history()), (21, vec![21]));
    assert_eq!(restored.limits, thermostat.limits);
}

#[test]
fn setters_validate_decoded_values() {
    let mut buffer: Vec<u8> = Vec::new();
    let limits = Limits { low: 10, high: 20 };
    serialize(
        &mut buffer,
        0,
        (&"attic".to_owned(), &limits, &99_i16, &Vec::<i16>::new()),
    )
    .unwrap();

    let mut restored = Thermostat::default();
    bind(&mut restored, accessors())
        .deserialize(&buffer, 0)
        .unwrap();
    assert_eq!(restored.target, 20);
    assert!(restored.history.is_empty());
}

#[test]
fn bound_hosts_compose_with_other_arguments() {
    let mut first = Thermostat::new("kitchen", 18);
    let mut second = Thermostat::new("garage", 7);
    let mut buffer: Vec<u8> = Vec::new();
    let end = serialize(
        &mut buffer,
        0,
        (
            &2_u8,
            Hook(bind(&mut first, accessors())),
            Hook(bind(&mut second, accessors())),
        ),
    )
    .unwrap();

    let (mut count, mut a, mut b) = (0_u8, Thermostat::default(), Thermostat::default());
    let position = deserialize(
        &buffer,
        0,
        (
            &mut count,
            Hook(bind(&mut a, accessors())),
            Hook(bind(&mut b, accessors())),
        ),
    )
    .unwrap();
    assert_eq!(position, end);
    assert_eq!(count, 2);
    assert_eq!((a.name.as_str(), a.target), ("kitchen", 18));
    assert_eq!((b.name.as_str(), b.target), ("garage", 7));
}

#[test]
fn bound_records_share_memory() {
    let mut first = Thermostat::new("porch", 12);
    let mut second = Thermostat::new("cellar", 9);
    let mut buffer: Vec<u8> = Vec::new();
    let p1 = bind(&mut first, accessors())
        .serialize(&mut buffer, 0)
        .unwrap();
    let p2 = bind(&mut second, accessors())
        .serialize(&mut buffer, p1)
        .unwrap();
    assert_eq!(p2, buffer.len());

    let mut restored = Thermostat::default();
    assert_eq!(
        bind(&mut restored, accessors())
            .deserialize(&buffer, p1)
            .unwrap(),
        p2
    );
    assert_eq!(restored.name, "cellar");
}

#[test]
fn failed_property_keeps_setter_uncalled() {
    let mut text = String::new();
    serialize(&mut text, 0, (&"den".to_owned(), &1_i16, &40_i16)).unwrap();
    // The record lacks the target and history.
    let mut restored = Thermostat::new("old", 15);
    assert_matches!(
        bind(&mut restored, accessors()).deserialize(&text, 0),
        Err(Error::OutOfRange { .. })
    );
    assert_eq!(restored.name, "den");
    assert_eq!(restored.limits, Limits { low: 1, high: 40 });
    assert_eq!((restored.target, restored.setter_calls), (15, 0));
}

#[test]
fn options_apply_to_bound_hosts() {
    let options = Options::default().with_delimiter(';');
    let mut thermostat = Thermostat::new("loft", 25);
    let mut text = String::new();
    bind(&mut thermostat, accessors())
        .serialize_with(&options, &mut text, 0)
        .unwrap();
    assert_eq!(text, "4;loft;5;30;25;1;25;");

    let mut restored = Thermostat::default();
    bind(&mut restored, accessors())
        .deserialize_with(&options, &text, 0)
        .unwrap();
    assert_eq!(restored.target, 25);
}
