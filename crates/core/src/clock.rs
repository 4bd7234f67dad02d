// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Simulated millisecond tick counter.
///
/// Only moves when a test sets it or a blocking delay consumes time. Wraps at
/// `u32::MAX` like the hardware tick counters it stands in for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SimClock {
    millis: u32,
}

impl SimClock {
    pub fn new(start: u32) -> Self {
        Self { millis: start }
    }

    pub fn now(&self) -> u32 {
        self.millis
    }

    pub fn set(&mut self, millis: u32) {
        self.millis = millis;
    }

    pub fn advance(&mut self, millis: u32) {
        self.millis = self.millis.wrapping_add(millis);
    }
}
