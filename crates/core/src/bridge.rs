// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::event::{CallEvent, FromValue, Value};
use crate::expect::{MockFailure, MockSupport};
use std::fmt;

/// Trait representing an expectation engine.
///
/// Every stub call is offered to the verifier exactly once. `Ok(Some(_))`
/// overrides the stub's return value, `Ok(None)` lets the stub compute it from
/// simulated state, `Err(_)` fails the test.
pub trait CallVerifier {
    fn actual_call(&mut self, call: &CallEvent) -> Result<Option<Value>, MockFailure>;
}

/// A bridge that connects the stub layer to a [`CallVerifier`].
pub struct CallBridge {
    verifier: Box<dyn CallVerifier>,
}

impl Default for CallBridge {
    /// A bridge that rejects every call.
    fn default() -> Self {
        Self::new(MockSupport::new())
    }
}

impl fmt::Debug for CallBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallBridge").finish_non_exhaustive()
    }
}

impl CallBridge {
    pub fn new(verifier: impl CallVerifier + 'static) -> Self {
        Self {
            verifier: Box::new(verifier),
        }
    }

    /// Forwards `call` and returns the override, if the verifier declared one.
    /// A rejected call fails the running test on the spot.
    #[track_caller]
    pub fn record(&mut self, call: CallEvent) -> Option<Value> {
        tracing::trace!("{}", call);
        match self.verifier.actual_call(&call) {
            Ok(value) => value,
            Err(failure) => fail(failure),
        }
    }

    #[track_caller]
    pub fn record_returning<T: FromValue>(&mut self, call: CallEvent) -> Option<T> {
        let name = call.name.clone();
        let value = self.record(call)?;
        match T::from_value(&value) {
            Some(v) => Some(v),
            None => fail(MockFailure::ReturnType { call: name, value }),
        }
    }
}

#[track_caller]
fn fail(failure: MockFailure) -> ! {
    tracing::error!("Mock failure: {}", failure);
    panic!("{}", failure)
}
