// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Test helpers in Arduino terms. None of them emit call events.

use crate::{interrupt_source, pin_line};
use pinspy_core::{sim, Callback, Level};

pub fn registered_callback(interrupt_num: u8) -> Option<Callback> {
    sim::registered_callback(interrupt_source(interrupt_num))
}

pub fn is_armed(interrupt_num: u8) -> bool {
    sim::is_armed(interrupt_source(interrupt_num))
}

/// Fires the routine attached to `interrupt_num`, if it is still attached.
pub fn trigger(interrupt_num: u8) -> bool {
    sim::trigger(interrupt_source(interrupt_num))
}

pub fn set_millis(ms: u32) {
    sim::set_ticks(ms);
}

pub fn current_millis() -> u32 {
    sim::ticks()
}

pub fn set_pin_state(pin: u8, level: Level) {
    sim::set_line_state(pin_line(pin), level);
}

pub fn pin_state(pin: u8) -> Level {
    sim::line_state(pin_line(pin))
}
