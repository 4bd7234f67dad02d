// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Arduino sketches. The LED starts off; the button is read with the pull-up
//! when active-low (caught `FALLING`), plain `INPUT` when active-high
//! (caught `RISING`).

use crate::board::AvrPins;
use crate::Sketch;
use pinspy_avr::{
    attach_interrupt, delay, digital_pin_to_interrupt, digital_read, digital_write, millis,
    pin_mode, Callback, FALLING, INPUT, INPUT_PULLUP, OUTPUT, RISING,
};
use std::cell::Cell;
use std::rc::Rc;

pub const BLINK_INTERVAL_MS: u32 = 1000;
pub const GATED_BLINK_DELAY_MS: u32 = 500;

/// Classic blocking blink.
#[derive(Debug, Default)]
pub struct Blink {
    pins: AvrPins,
}

impl Blink {
    pub fn new(pins: AvrPins) -> Self {
        Self { pins }
    }
}

impl Sketch for Blink {
    fn setup(&mut self) {
        pin_mode(self.pins.led, OUTPUT);
    }

    fn run_loop(&mut self) {
        digital_write(self.pins.led, self.pins.led_level(true));
        delay(BLINK_INTERVAL_MS);
        digital_write(self.pins.led, self.pins.led_level(false));
        delay(BLINK_INTERVAL_MS);
    }
}

fn flip_on_press(flag: &Rc<Cell<bool>>) -> Callback {
    let flag = flag.clone();
    Callback::new(move || flag.set(!flag.get()))
}

fn setup_led_and_button(pins: &AvrPins, isr: &Callback) {
    pin_mode(pins.led, OUTPUT);
    digital_write(pins.led, pins.led_level(false));
    let (mode, edge) = if pins.button_active_high {
        (INPUT, RISING)
    } else {
        (INPUT_PULLUP, FALLING)
    };
    pin_mode(pins.button, mode);
    attach_interrupt(digital_pin_to_interrupt(pins.button), isr.clone(), edge);
}

/// The button turns the LED toggling on and off. While on, every loop pass
/// writes one level, alternating off, on, off, ...
#[derive(Debug)]
pub struct ToggleOnInterrupt {
    pins: AvrPins,
    toggling: Rc<Cell<bool>>,
    isr: Callback,
    led_on: bool,
}

impl ToggleOnInterrupt {
    pub fn new(pins: AvrPins) -> Self {
        let toggling = Rc::new(Cell::new(false));
        Self {
            pins,
            isr: flip_on_press(&toggling),
            toggling,
            led_on: false,
        }
    }

    /// The routine `setup` attaches to the button.
    pub fn isr(&self) -> Callback {
        self.isr.clone()
    }

    pub fn is_toggling(&self) -> bool {
        self.toggling.get()
    }
}

impl Default for ToggleOnInterrupt {
    fn default() -> Self {
        Self::new(AvrPins::default())
    }
}

impl Sketch for ToggleOnInterrupt {
    fn setup(&mut self) {
        setup_led_and_button(&self.pins, &self.isr);
    }

    fn run_loop(&mut self) {
        if !self.toggling.get() {
            return;
        }
        digital_write(self.pins.led, self.pins.led_level(self.led_on));
        self.led_on = !self.led_on;
    }
}

/// Blink without `delay()`: polls `millis()` and flips the LED once per
/// interval.
#[derive(Debug, Default)]
pub struct NonBlockingBlink {
    pins: AvrPins,
    last_toggle: u32,
}

impl NonBlockingBlink {
    pub fn new(pins: AvrPins) -> Self {
        Self {
            pins,
            last_toggle: 0,
        }
    }
}

impl Sketch for NonBlockingBlink {
    fn setup(&mut self) {
        pin_mode(self.pins.led, OUTPUT);
        digital_write(self.pins.led, self.pins.led_level(false));
        self.last_toggle = millis();
    }

    fn run_loop(&mut self) {
        let now = millis();
        // wrapping_sub keeps the schedule across the 49.7 day rollover
        if now.wrapping_sub(self.last_toggle) >= BLINK_INTERVAL_MS {
            self.last_toggle = now;
            digital_write(self.pins.led, !digital_read(self.pins.led));
        }
    }
}

/// The button starts and stops a blocking blink. While stopped the loop
/// does nothing at all.
#[derive(Debug)]
pub struct InterruptGatedBlink {
    pins: AvrPins,
    blinking: Rc<Cell<bool>>,
    isr: Callback,
}

impl InterruptGatedBlink {
    pub fn new(pins: AvrPins) -> Self {
        let blinking = Rc::new(Cell::new(false));
        Self {
            pins,
            isr: flip_on_press(&blinking),
            blinking,
        }
    }

    pub fn isr(&self) -> Callback {
        self.isr.clone()
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking.get()
    }
}

impl Default for InterruptGatedBlink {
    fn default() -> Self {
        Self::new(AvrPins::default())
    }
}

impl Sketch for InterruptGatedBlink {
    fn setup(&mut self) {
        setup_led_and_button(&self.pins, &self.isr);
    }

    fn run_loop(&mut self) {
        if self.blinking.get() {
            digital_write(self.pins.led, !digital_read(self.pins.led));
            delay(GATED_BLINK_DELAY_MS);
        }
    }
}
