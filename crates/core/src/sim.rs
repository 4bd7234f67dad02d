// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Test-side access to the simulation. Nothing here emits a call event.

use crate::interrupt::{Callback, SourceId};
use crate::session::with_simulation;
use crate::signals::{Level, LineId};
use crate::snapshot::SimSnapshot;

pub fn registered_callback(source: SourceId) -> Option<Callback> {
    with_simulation(|sim| sim.interrupts.get(source))
}

pub fn is_armed(source: SourceId) -> bool {
    with_simulation(|sim| sim.interrupts.is_armed(source))
}

/// Simulates a hardware edge on `source`: runs its routine if the source is
/// armed. Returns whether anything ran.
pub fn trigger(source: SourceId) -> bool {
    // The borrow has to end before the routine runs, it may call stubs.
    let callback = with_simulation(|sim| sim.interrupts.armed(source));
    match callback {
        Some(cb) => {
            tracing::debug!("Interrupt {} fired", source);
            cb.invoke();
            true
        }
        None => {
            tracing::warn!("Interrupt {} triggered while not armed", source);
            false
        }
    }
}

pub fn set_ticks(millis: u32) {
    with_simulation(|sim| sim.clock.set(millis));
}

pub fn ticks() -> u32 {
    with_simulation(|sim| sim.clock.now())
}

pub fn set_line_state(line: LineId, level: Level) {
    with_simulation(|sim| sim.state.write(line, level));
}

pub fn line_state(line: LineId) -> Level {
    with_simulation(|sim| sim.state.read(line))
}

pub fn snapshot() -> SimSnapshot {
    with_simulation(|sim| sim.snapshot())
}
