// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::event::{CallEvent, FromValue};
use crate::interrupt::{Callback, SourceId};
use crate::session::with_simulation;
use crate::signals::Trigger;

pub fn attach(call: CallEvent, source: SourceId, callback: Callback, trigger: Trigger) {
    with_simulation(|sim| {
        tracing::debug!("Interrupt {} attached ({:?})", source, trigger);
        sim.interrupts.attach(source, callback, trigger);
        sim.bridge.record(call);
    });
}

pub fn detach(call: CallEvent, source: SourceId) {
    with_simulation(|sim| {
        sim.bridge.record(call);
        tracing::debug!("Interrupt {} disarmed", source);
        sim.interrupts.detach(source);
    });
}

/// Line-to-source lookup. Without an override the caller's `default` is
/// returned, which the platforms set to the line number itself.
pub fn map_line<T: FromValue>(call: CallEvent, default: T) -> T {
    with_simulation(|sim| sim.bridge.record_returning::<T>(call).unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expect::MockSupport;
    use crate::{sim, Session};

    #[test]
    fn test_attach_detach_arming() {
        let mock = MockSupport::new();
        let _session = Session::start(mock.clone());
        mock.ignore_other_calls();

        let cb = Callback::new(|| {});
        attach(CallEvent::new("attach"), SourceId(4), cb.clone(), Trigger::Rising);
        assert!(sim::is_armed(SourceId(4)));
        assert_eq!(sim::registered_callback(SourceId(4)), Some(cb));

        detach(CallEvent::new("detach"), SourceId(4));
        assert!(!sim::is_armed(SourceId(4)));
    }

    #[test]
    fn test_map_line_identity_and_override() {
        let mock = MockSupport::new();
        let _session = Session::start(mock.clone());
        mock.expect_one_call("map").and_return_value(7);
        mock.ignore_other_calls();

        assert_eq!(map_line(CallEvent::new("map"), 23u8), 7);
        assert_eq!(map_line(CallEvent::new("other_map"), 23u8), 23);
    }
}
