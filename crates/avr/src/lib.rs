// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Arduino AVR core API (`pinMode`, `digitalWrite`, `millis`, ...) running
//! against the PinSpy simulation.
//!
//! Every function emits a call event named after the Arduino function, with
//! the Arduino parameter names, so tests can declare expectations exactly as
//! they read in the firmware source.

pub mod sim;

use pinspy_core::peripherals::{exti, gpio, systick};
use pinspy_core::{CallEvent, LineId, SourceId, Trigger, Value};

pub use pinspy_core::{Callback, Level};

pub const LOW: Level = Level::Low;
pub const HIGH: Level = Level::High;

/// AVR boards expose a single, flat pin numbering.
pub const BOARD_CONTROLLER: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinMode {
    Input = 0x0,
    Output = 0x1,
    InputPullup = 0x2,
}

pub const INPUT: PinMode = PinMode::Input;
pub const OUTPUT: PinMode = PinMode::Output;
pub const INPUT_PULLUP: PinMode = PinMode::InputPullup;

impl From<PinMode> for Value {
    fn from(mode: PinMode) -> Self {
        Value::Int(mode as i64)
    }
}

/// `attachInterrupt` modes, ATmega core encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptMode {
    Low = 0,
    Change = 1,
    Falling = 2,
    Rising = 3,
}

pub const CHANGE: InterruptMode = InterruptMode::Change;
pub const FALLING: InterruptMode = InterruptMode::Falling;
pub const RISING: InterruptMode = InterruptMode::Rising;

impl From<InterruptMode> for Value {
    fn from(mode: InterruptMode) -> Self {
        Value::Int(mode as i64)
    }
}

impl From<InterruptMode> for Trigger {
    fn from(mode: InterruptMode) -> Self {
        match mode {
            InterruptMode::Low => Trigger::Low,
            InterruptMode::Change => Trigger::Change,
            InterruptMode::Falling => Trigger::Falling,
            InterruptMode::Rising => Trigger::Rising,
        }
    }
}

pub fn pin_line(pin: u8) -> LineId {
    LineId::new(BOARD_CONTROLLER, pin as u16)
}

pub fn interrupt_source(interrupt_num: u8) -> SourceId {
    SourceId(interrupt_num as u32)
}

pub fn pin_mode(pin: u8, mode: PinMode) {
    gpio::configure(
        CallEvent::new("pinMode")
            .with("pin", pin)
            .with("mode", mode),
    );
}

pub fn digital_write(pin: u8, value: Level) {
    gpio::write(
        CallEvent::new("digitalWrite")
            .with("pin", pin)
            .with("value", value),
        pin_line(pin),
        value,
    );
}

pub fn digital_read(pin: u8) -> Level {
    gpio::read(CallEvent::new("digitalRead").with("pin", pin), pin_line(pin))
}

/// Not part of the stock AVR core, but offered by most newer Arduino cores.
pub fn digital_toggle(pin: u8) {
    gpio::toggle(CallEvent::new("digitalToggle").with("pin", pin), pin_line(pin));
}

pub fn delay(ms: u32) {
    systick::delay(CallEvent::new("delay").with("ms", ms), ms);
}

pub fn millis() -> u32 {
    systick::ticks(CallEvent::new("millis"))
}

/// `user_func` is a closure or a [`Callback`] the caller already holds; the
/// `userFunc` parameter carries that handle's identity.
pub fn attach_interrupt(interrupt_num: u8, user_func: impl Into<Callback>, mode: InterruptMode) {
    let callback = user_func.into();
    let call = CallEvent::new("attachInterrupt")
        .with("interruptNum", interrupt_num)
        .with("userFunc", &callback)
        .with("mode", mode);
    exti::attach(call, interrupt_source(interrupt_num), callback, mode.into());
}

pub fn detach_interrupt(interrupt_num: u8) {
    exti::detach(
        CallEvent::new("detachInterrupt").with("interruptNum", interrupt_num),
        interrupt_source(interrupt_num),
    );
}

/// Identity unless the test declares a return value.
pub fn digital_pin_to_interrupt(pin: u8) -> u8 {
    exti::map_line(CallEvent::new("digitalPinToInterrupt").with("pin", pin), pin)
}
