// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::event::CallEvent;
use crate::session::with_simulation;

/// Blocking delay: records the call, then consumes `millis` of simulated time.
pub fn delay(call: CallEvent, millis: u32) {
    with_simulation(|sim| {
        sim.bridge.record(call);
        sim.clock.advance(millis);
    });
}

pub fn ticks(call: CallEvent) -> u32 {
    with_simulation(|sim| {
        sim.bridge
            .record_returning::<u32>(call)
            .unwrap_or_else(|| sim.clock.now())
    })
}
