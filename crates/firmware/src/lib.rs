// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Exercise sketches written against the Arduino and STM32 HAL APIs.
//!
//! They are ordinary firmware: they only call the platform API and never
//! touch the simulation directly. The tests in `tests/` drive them through
//! their `setup`/`loop` entry points and inspect the calls they make.

pub mod avr;
pub mod board;
pub mod stm32;

pub use board::{AvrPins, Stm32Pins};

/// The firmware entry points: `setup()` once, then `loop()` forever.
pub trait Sketch {
    fn setup(&mut self);

    /// One pass of the main loop.
    fn run_loop(&mut self);

    fn run_loops(&mut self, count: usize) {
        for _ in 0..count {
            self.run_loop();
        }
    }
}
