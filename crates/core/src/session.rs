// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Per-thread simulation slot.
//!
//! Stubs keep the exact signatures of the hardware API, so they cannot be
//! handed a context; they reach the simulation through [`with_simulation`]
//! instead. The slot is thread-local, which gives every `#[test]` its own
//! simulation under the default parallel test runner.

use crate::bridge::{CallBridge, CallVerifier};
use crate::config::SimulationConfig;
use crate::Simulation;
use pinspy_config::BoardManifest;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static SIMULATION: RefCell<Simulation> = RefCell::new(Simulation::default());
}

/// Runs `f` against this thread's simulation.
///
/// Must not be re-entered: interrupt callbacks are cloned out first and
/// invoked after the borrow ends (see [`crate::sim::trigger`]).
pub fn with_simulation<R>(f: impl FnOnce(&mut Simulation) -> R) -> R {
    SIMULATION.with(|sim| f(&mut sim.borrow_mut()))
}

fn install(sim: Simulation) {
    // Dropping the previous simulation can drop captured firmware state, so
    // swap it out before letting it go.
    let previous = SIMULATION.with(|slot| slot.replace(sim));
    drop(previous);
}

/// Restores the default simulation: no lines, tick 0, no interrupts, and a
/// verifier that rejects every call.
pub fn reset() {
    tracing::debug!("Simulation reset");
    install(Simulation::default());
}

/// Scope of one test against the simulation.
///
/// Starting a session resets this thread's simulation and injects the
/// verifier; dropping it resets the simulation again.
#[must_use = "the simulation is reset when the session is dropped"]
#[derive(Debug)]
pub struct Session {
    _thread_bound: PhantomData<Rc<()>>,
}

impl Session {
    pub fn start(verifier: impl CallVerifier + 'static) -> Self {
        Self::with_config(SimulationConfig::default(), verifier)
    }

    pub fn with_config(config: SimulationConfig, verifier: impl CallVerifier + 'static) -> Self {
        tracing::debug!(
            "Session start: board={:?} capacity={} ticks={}",
            config.board,
            config.state_capacity,
            config.initial_ticks
        );
        install(Simulation::new(config, CallBridge::new(verifier)));
        Self {
            _thread_bound: PhantomData,
        }
    }

    pub fn from_manifest(manifest: &BoardManifest, verifier: impl CallVerifier + 'static) -> Self {
        Self::with_config(SimulationConfig::from(manifest), verifier)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        reset();
    }
}
