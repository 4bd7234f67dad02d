// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Test helpers in HAL terms. None of them emit call events.

use crate::{exti_source, pin_line, GpioPinState, GpioPort};
use pinspy_core::{sim, Callback};

pub fn registered_callback(exti_line: u16) -> Option<Callback> {
    sim::registered_callback(exti_source(exti_line))
}

pub fn is_armed(exti_line: u16) -> bool {
    sim::is_armed(exti_source(exti_line))
}

pub fn trigger(exti_line: u16) -> bool {
    sim::trigger(exti_source(exti_line))
}

pub fn set_tick(tick: u32) {
    sim::set_ticks(tick);
}

pub fn current_tick() -> u32 {
    sim::ticks()
}

pub fn set_pin_state(port: GpioPort, pin: u16, state: GpioPinState) {
    sim::set_line_state(pin_line(port, pin), state.into());
}

pub fn pin_state(port: GpioPort, pin: u16) -> GpioPinState {
    sim::line_state(pin_line(port, pin)).into()
}
