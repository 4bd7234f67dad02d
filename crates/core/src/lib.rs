// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod bridge;
pub mod clock;
pub mod config;
pub mod event;
pub mod expect;
pub mod interrupt;
pub mod peripherals;
pub mod session;
pub mod signals;
pub mod sim;
pub mod snapshot;
pub mod state;

pub use bridge::{CallBridge, CallVerifier};
pub use config::SimulationConfig;
pub use event::{CallEvent, FromValue, Value};
pub use expect::{MockFailure, MockSupport};
pub use interrupt::{Callback, SourceId};
pub use session::{reset, with_simulation, Session};
pub use signals::{Level, LineId, Trigger};

use clock::SimClock;
use interrupt::InterruptRegistry;
use snapshot::{InterruptSnapshot, SimSnapshot};
use state::StateStore;

/// Everything a stub may observe or change: line levels, the tick counter,
/// attached interrupts and the route to the expectation engine.
#[derive(Debug, Default)]
pub struct Simulation {
    pub state: StateStore,
    pub clock: SimClock,
    pub interrupts: InterruptRegistry,
    pub bridge: CallBridge,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig, bridge: CallBridge) -> Self {
        Self {
            state: StateStore::new(config.state_capacity, config.capacity_policy),
            clock: SimClock::new(config.initial_ticks),
            interrupts: InterruptRegistry::new(),
            bridge,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            board: self.config.board.clone(),
            ticks: self.clock.now(),
            lines: self.state.entries().copied().collect(),
            dropped_writes: self.state.dropped_writes(),
            interrupts: self
                .interrupts
                .attached()
                .map(|a| InterruptSnapshot {
                    source: a.source,
                    trigger: a.trigger,
                    armed: a.armed,
                })
                .collect(),
        }
    }
}
