// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State types shared by the integration tests.

#![allow(dead_code)]

use acid_state::{Acidic, Event, Method, Query, Update};
use serde::{Deserialize, Serialize};

/// A single integer
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Add(pub i64);

impl Method for Add {
    type Output = i64;
    const TAG: &'static str = "add";
}

impl Update<Counter> for Add {
    fn update(&self, state: &mut Counter) -> i64 {
        state.value += self.0;
        state.value
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentValue;

impl Method for CurrentValue {
    type Output = i64;
    const TAG: &'static str = "current_value";
}

impl Query<Counter> for CurrentValue {
    fn query(&self, state: &Counter) -> i64 {
        state.value
    }
}

/// Not part of `Counter::events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Double;

impl Method for Double {
    type Output = i64;
    const TAG: &'static str = "double";
}

impl Update<Counter> for Double {
    fn update(&self, state: &mut Counter) -> i64 {
        state.value *= 2;
        state.value
    }
}

impl Acidic for Counter {
    fn events() -> Vec<Event<Self>> {
        vec![Event::update::<Add>(), Event::query::<CurrentValue>()]
    }
}

/// Append-only list, for checking the order updates were applied in
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub entries: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Push(pub u64);

impl Method for Push {
    type Output = usize;
    const TAG: &'static str = "push";
}

impl Update<Ledger> for Push {
    fn update(&self, state: &mut Ledger) -> usize {
        state.entries.push(self.0);
        state.entries.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entries;

impl Method for Entries {
    type Output = Vec<u64>;
    const TAG: &'static str = "entries";
}

impl Query<Ledger> for Entries {
    fn query(&self, state: &Ledger) -> Vec<u64> {
        state.entries.clone()
    }
}

impl Acidic for Ledger {
    fn events() -> Vec<Event<Self>> {
        vec![Event::update::<Push>(), Event::query::<Entries>()]
    }
}

/// Two balances whose sum never changes
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accounts {
    pub checking: i64,
    pub savings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer(pub i64);

impl Method for Transfer {
    type Output = ();
    const TAG: &'static str = "transfer";
}

impl Update<Accounts> for Transfer {
    fn update(&self, state: &mut Accounts) {
        state.checking -= self.0;
        // Widen the window in which a torn read would be visible
        std::thread::yield_now();
        state.savings += self.0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Total;

impl Method for Total {
    type Output = i64;
    const TAG: &'static str = "total";
}

impl Query<Accounts> for Total {
    fn query(&self, state: &Accounts) -> i64 {
        state.checking + state.savings
    }
}

impl Acidic for Accounts {
    fn events() -> Vec<Event<Self>> {
        vec![Event::update::<Transfer>(), Event::query::<Total>()]
    }
}
