// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! STM32 HAL sketches. Same exercises as [`crate::avr`]: LED push-pull
//! output starting off, button input pulled to its idle level and caught on
//! the edge a press produces.

use crate::board::Stm32Pins;
use crate::Sketch;
use pinspy_stm32::{
    hal_delay, hal_exti_register_callback, hal_get_tick, hal_gpio_init,
    hal_gpio_pin_to_exti_line, hal_gpio_toggle_pin, hal_gpio_write_pin, Callback, GpioInit,
    EXTI_TRIGGER_FALLING, EXTI_TRIGGER_RISING, GPIO_MODE_IT_FALLING, GPIO_MODE_IT_RISING,
    GPIO_MODE_OUTPUT_PP, GPIO_NOPULL, GPIO_PULLDOWN, GPIO_PULLUP, GPIO_SPEED_FREQ_LOW,
};
use std::cell::Cell;
use std::rc::Rc;

pub const BLINK_INTERVAL_MS: u32 = 1000;
pub const GATED_BLINK_DELAY_MS: u32 = 500;

fn init_led(pins: &Stm32Pins) {
    hal_gpio_init(
        pins.led_port,
        &GpioInit {
            pin: pins.led_pin,
            mode: GPIO_MODE_OUTPUT_PP,
            pull: GPIO_NOPULL,
            speed: GPIO_SPEED_FREQ_LOW,
        },
    );
    hal_gpio_write_pin(pins.led_port, pins.led_pin, pins.led_state(false));
}

fn init_button(pins: &Stm32Pins, isr: &Callback) {
    let (mode, pull, trigger) = if pins.button_active_high {
        (GPIO_MODE_IT_RISING, GPIO_PULLDOWN, EXTI_TRIGGER_RISING)
    } else {
        (GPIO_MODE_IT_FALLING, GPIO_PULLUP, EXTI_TRIGGER_FALLING)
    };
    hal_gpio_init(
        pins.button_port,
        &GpioInit {
            pin: pins.button_pin,
            mode,
            pull,
            speed: GPIO_SPEED_FREQ_LOW,
        },
    );
    let exti_line = hal_gpio_pin_to_exti_line(pins.button_pin);
    hal_exti_register_callback(exti_line, isr.clone(), trigger);
}

fn flip_on_press(flag: &Rc<Cell<bool>>) -> Callback {
    let flag = flag.clone();
    Callback::new(move || flag.set(!flag.get()))
}

#[derive(Debug, Default)]
pub struct Blink {
    pins: Stm32Pins,
}

impl Blink {
    pub fn new(pins: Stm32Pins) -> Self {
        Self { pins }
    }
}

impl Sketch for Blink {
    fn setup(&mut self) {
        init_led(&self.pins);
    }

    fn run_loop(&mut self) {
        hal_gpio_toggle_pin(self.pins.led_port, self.pins.led_pin);
        hal_delay(BLINK_INTERVAL_MS);
    }
}

#[derive(Debug)]
pub struct ToggleOnInterrupt {
    pins: Stm32Pins,
    toggling: Rc<Cell<bool>>,
    isr: Callback,
    led_on: bool,
}

impl ToggleOnInterrupt {
    pub fn new(pins: Stm32Pins) -> Self {
        let toggling = Rc::new(Cell::new(false));
        Self {
            pins,
            isr: flip_on_press(&toggling),
            toggling,
            led_on: false,
        }
    }

    /// The callback `setup` registers on the button's EXTI line.
    pub fn isr(&self) -> Callback {
        self.isr.clone()
    }

    pub fn is_toggling(&self) -> bool {
        self.toggling.get()
    }
}

impl Default for ToggleOnInterrupt {
    fn default() -> Self {
        Self::new(Stm32Pins::default())
    }
}

impl Sketch for ToggleOnInterrupt {
    fn setup(&mut self) {
        init_led(&self.pins);
        init_button(&self.pins, &self.isr);
    }

    fn run_loop(&mut self) {
        if !self.toggling.get() {
            return;
        }
        hal_gpio_write_pin(
            self.pins.led_port,
            self.pins.led_pin,
            self.pins.led_state(self.led_on),
        );
        self.led_on = !self.led_on;
    }
}

#[derive(Debug, Default)]
pub struct NonBlockingBlink {
    pins: Stm32Pins,
    last_toggle: u32,
}

impl NonBlockingBlink {
    pub fn new(pins: Stm32Pins) -> Self {
        Self {
            pins,
            last_toggle: 0,
        }
    }
}

impl Sketch for NonBlockingBlink {
    fn setup(&mut self) {
        init_led(&self.pins);
        self.last_toggle = hal_get_tick();
    }

    fn run_loop(&mut self) {
        let tick = hal_get_tick();
        if tick.wrapping_sub(self.last_toggle) >= BLINK_INTERVAL_MS {
            self.last_toggle = tick;
            hal_gpio_toggle_pin(self.pins.led_port, self.pins.led_pin);
        }
    }
}

#[derive(Debug)]
pub struct InterruptGatedBlink {
    pins: Stm32Pins,
    blinking: Rc<Cell<bool>>,
    isr: Callback,
}

impl InterruptGatedBlink {
    pub fn new(pins: Stm32Pins) -> Self {
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
        Self::new(Stm32Pins::default())
    }
}

impl Sketch for InterruptGatedBlink {
    fn setup(&mut self) {
        init_led(&self.pins);
        init_button(&self.pins, &self.isr);
    }

    fn run_loop(&mut self) {
        if self.blinking.get() {
            hal_gpio_toggle_pin(self.pins.led_port, self.pins.led_pin);
            hal_delay(GATED_BLINK_DELAY_MS);
        }
    }
}
