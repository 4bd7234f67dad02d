// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::event::CallEvent;
use crate::session::with_simulation;
use crate::signals::{Level, LineId};

/// Direction/mode configuration. The mode is only visible through the event.
pub fn configure(call: CallEvent) {
    with_simulation(|sim| {
        sim.bridge.record(call);
    });
}

pub fn write(call: CallEvent, line: LineId, level: Level) {
    with_simulation(|sim| {
        sim.bridge.record(call);
        sim.state.write(line, level);
    });
}

/// Declared override first, then the last written level, then `Low`.
pub fn read(call: CallEvent, line: LineId) -> Level {
    with_simulation(|sim| {
        sim.bridge
            .record_returning::<Level>(call)
            .unwrap_or_else(|| sim.state.read(line))
    })
}

pub fn toggle(call: CallEvent, line: LineId) {
    with_simulation(|sim| {
        sim.bridge.record(call);
        sim.state.toggle(line);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expect::MockSupport;
    use crate::Session;

    const LED: LineId = LineId::new(0, 13);

    fn read_led() -> Level {
        read(CallEvent::new("read").with("line", 13u16), LED)
    }

    #[test]
    fn test_write_then_read_back() {
        let mock = MockSupport::new();
        let _session = Session::start(mock.clone());
        mock.ignore_other_calls();

        assert_eq!(read_led(), Level::Low);
        write(CallEvent::new("write"), LED, Level::High);
        assert_eq!(read_led(), Level::High);
        toggle(CallEvent::new("toggle"), LED);
        assert_eq!(read_led(), Level::Low);
    }

    #[test]
    fn test_read_override_wins_over_state() {
        let mock = MockSupport::new();
        let _session = Session::start(mock.clone());
        mock.expect_one_call("write");
        mock.expect_one_call("read").and_return_value(0);

        write(CallEvent::new("write"), LED, Level::High);
        assert_eq!(read_led(), Level::Low);
        mock.check_expectations();
    }

    #[test]
    #[should_panic(expected = "unexpected call: write()")]
    fn test_write_without_expectation_fails() {
        let _session = Session::start(MockSupport::new());
        write(CallEvent::new("write"), LED, Level::High);
    }
}
