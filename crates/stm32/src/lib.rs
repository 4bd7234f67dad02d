// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! STM32 HAL subset (`HAL_GPIO_*`, `HAL_Delay`, `HAL_GetTick`, EXTI callback
//! registration) running against the PinSpy simulation.
//!
//! Call events carry the HAL function names and parameter names. A pin is
//! identified by its port and the `GPIO_Pin` mask exactly as passed, so the
//! same mask must be used to write and to read back a line.

pub mod sim;

use pinspy_core::peripherals::{exti, gpio, systick};
use pinspy_core::{CallEvent, LineId, SourceId, Trigger, Value};

pub use pinspy_core::{Callback, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GpioPort {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
}

pub const GPIOA: GpioPort = GpioPort::A;
pub const GPIOB: GpioPort = GpioPort::B;
pub const GPIOC: GpioPort = GpioPort::C;
pub const GPIOD: GpioPort = GpioPort::D;
pub const GPIOE: GpioPort = GpioPort::E;
pub const GPIOF: GpioPort = GpioPort::F;
pub const GPIOG: GpioPort = GpioPort::G;
pub const GPIOH: GpioPort = GpioPort::H;

impl TryFrom<u8> for GpioPort {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Ok(match index {
            0 => GpioPort::A,
            1 => GpioPort::B,
            2 => GpioPort::C,
            3 => GpioPort::D,
            4 => GpioPort::E,
            5 => GpioPort::F,
            6 => GpioPort::G,
            7 => GpioPort::H,
            8 => GpioPort::I,
            9 => GpioPort::J,
            10 => GpioPort::K,
            _ => return Err(index),
        })
    }
}

impl From<GpioPort> for Value {
    fn from(port: GpioPort) -> Self {
        Value::Int(port as i64)
    }
}

pub const GPIO_PIN_0: u16 = 0x0001;
pub const GPIO_PIN_1: u16 = 0x0002;
pub const GPIO_PIN_2: u16 = 0x0004;
pub const GPIO_PIN_3: u16 = 0x0008;
pub const GPIO_PIN_4: u16 = 0x0010;
pub const GPIO_PIN_5: u16 = 0x0020;
pub const GPIO_PIN_6: u16 = 0x0040;
pub const GPIO_PIN_7: u16 = 0x0080;
pub const GPIO_PIN_8: u16 = 0x0100;
pub const GPIO_PIN_9: u16 = 0x0200;
pub const GPIO_PIN_10: u16 = 0x0400;
pub const GPIO_PIN_11: u16 = 0x0800;
pub const GPIO_PIN_12: u16 = 0x1000;
pub const GPIO_PIN_13: u16 = 0x2000;
pub const GPIO_PIN_14: u16 = 0x4000;
pub const GPIO_PIN_15: u16 = 0x8000;
pub const GPIO_PIN_ALL: u16 = 0xFFFF;

pub const GPIO_MODE_INPUT: u32 = 0x0000_0000;
pub const GPIO_MODE_OUTPUT_PP: u32 = 0x0000_0001;
pub const GPIO_MODE_OUTPUT_OD: u32 = 0x0000_0011;
pub const GPIO_MODE_IT_RISING: u32 = 0x1011_0000;
pub const GPIO_MODE_IT_FALLING: u32 = 0x1021_0000;
pub const GPIO_MODE_IT_RISING_FALLING: u32 = 0x1031_0000;

pub const GPIO_NOPULL: u32 = 0x0;
pub const GPIO_PULLUP: u32 = 0x1;
pub const GPIO_PULLDOWN: u32 = 0x2;

pub const GPIO_SPEED_FREQ_LOW: u32 = 0x0;
pub const GPIO_SPEED_FREQ_MEDIUM: u32 = 0x1;
pub const GPIO_SPEED_FREQ_HIGH: u32 = 0x2;
pub const GPIO_SPEED_FREQ_VERY_HIGH: u32 = 0x3;

/// `GPIO_InitTypeDef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpioInit {
    pub pin: u16,
    pub mode: u32,
    pub pull: u32,
    pub speed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GpioPinState {
    #[default]
    Reset = 0,
    Set = 1,
}

pub const GPIO_PIN_RESET: GpioPinState = GpioPinState::Reset;
pub const GPIO_PIN_SET: GpioPinState = GpioPinState::Set;

impl From<Level> for GpioPinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => GpioPinState::Reset,
            Level::High => GpioPinState::Set,
        }
    }
}

impl From<GpioPinState> for Level {
    fn from(state: GpioPinState) -> Self {
        match state {
            GpioPinState::Reset => Level::Low,
            GpioPinState::Set => Level::High,
        }
    }
}

impl From<GpioPinState> for Value {
    fn from(state: GpioPinState) -> Self {
        Value::Int(state as i64)
    }
}

/// `EXTI_TRIGGER_*` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExtiTrigger {
    Rising = 0x01,
    Falling = 0x02,
    RisingFalling = 0x03,
}

pub const EXTI_TRIGGER_RISING: ExtiTrigger = ExtiTrigger::Rising;
pub const EXTI_TRIGGER_FALLING: ExtiTrigger = ExtiTrigger::Falling;
pub const EXTI_TRIGGER_RISING_FALLING: ExtiTrigger = ExtiTrigger::RisingFalling;

impl From<ExtiTrigger> for Value {
    fn from(trigger: ExtiTrigger) -> Self {
        Value::Int(trigger as i64)
    }
}

impl From<ExtiTrigger> for Trigger {
    fn from(trigger: ExtiTrigger) -> Self {
        match trigger {
            ExtiTrigger::Rising => Trigger::Rising,
            ExtiTrigger::Falling => Trigger::Falling,
            ExtiTrigger::RisingFalling => Trigger::Change,
        }
    }
}

pub fn pin_line(port: GpioPort, pin: u16) -> LineId {
    LineId::new(port as u8, pin)
}

pub fn exti_source(exti_line: u16) -> SourceId {
    SourceId(exti_line as u32)
}

pub fn hal_gpio_init(port: GpioPort, init: &GpioInit) {
    gpio::configure(
        CallEvent::new("HAL_GPIO_Init")
            .with("GPIOx", port)
            .with("Pin", init.pin)
            .with("Mode", init.mode)
            .with("Pull", init.pull)
            .with("Speed", init.speed),
    );
}

pub fn hal_gpio_write_pin(port: GpioPort, pin: u16, state: GpioPinState) {
    gpio::write(
        CallEvent::new("HAL_GPIO_WritePin")
            .with("GPIOx", port)
            .with("GPIO_Pin", pin)
            .with("PinState", state),
        pin_line(port, pin),
        state.into(),
    );
}

pub fn hal_gpio_read_pin(port: GpioPort, pin: u16) -> GpioPinState {
    let level = gpio::read(
        CallEvent::new("HAL_GPIO_ReadPin")
            .with("GPIOx", port)
            .with("GPIO_Pin", pin),
        pin_line(port, pin),
    );
    level.into()
}

pub fn hal_gpio_toggle_pin(port: GpioPort, pin: u16) {
    gpio::toggle(
        CallEvent::new("HAL_GPIO_TogglePin")
            .with("GPIOx", port)
            .with("GPIO_Pin", pin),
        pin_line(port, pin),
    );
}

pub fn hal_delay(delay: u32) {
    systick::delay(CallEvent::new("HAL_Delay").with("Delay", delay), delay);
}

pub fn hal_get_tick() -> u32 {
    systick::ticks(CallEvent::new("HAL_GetTick"))
}

/// Registers the routine run when `exti_line` fires, replacing any earlier
/// one, and arms the line.
pub fn hal_exti_register_callback(
    exti_line: u16,
    callback: impl Into<Callback>,
    trigger: ExtiTrigger,
) {
    let callback = callback.into();
    let call = CallEvent::new("HAL_EXTI_RegisterCallback")
        .with("ExtiLine", exti_line)
        .with("Callback", &callback)
        .with("Trigger", trigger);
    exti::attach(call, exti_source(exti_line), callback, trigger.into());
}

pub fn hal_exti_clear_config_line(exti_line: u16) {
    exti::detach(
        CallEvent::new("HAL_EXTI_ClearConfigLine").with("ExtiLine", exti_line),
        exti_source(exti_line),
    );
}

/// Identity unless the test declares a return value.
pub fn hal_gpio_pin_to_exti_line(pin: u16) -> u16 {
    exti::map_line(CallEvent::new("GPIO_PinToExtiLine").with("GPIO_Pin", pin), pin)
}
