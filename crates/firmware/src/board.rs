// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{anyhow, bail, Context, Result};
use pinspy_avr::Level;
use pinspy_config::{BoardIoBinding, BoardIoKind, BoardIoSignal, BoardManifest, Platform};
use pinspy_stm32::{GpioPinState, GpioPort, GPIOA, GPIOC, GPIO_PIN_0, GPIO_PIN_13};

pub const LED_ID: &str = "led";
pub const BUTTON_ID: &str = "button";

/// LED and button pins of an Arduino board.
///
/// `led_active_high: false` means the LED lights when its pin is driven LOW.
/// An active-low button idles HIGH on the internal pull-up and is caught on
/// the falling edge; an active-high one idles LOW and is caught rising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvrPins {
    pub led: u8,
    pub button: u8,
    pub led_active_high: bool,
    pub button_active_high: bool,
}

impl Default for AvrPins {
    /// Arduino Mega: on-board LED on 13, push button from 23 to ground.
    fn default() -> Self {
        Self {
            led: 13,
            button: 23,
            led_active_high: true,
            button_active_high: false,
        }
    }
}

impl AvrPins {
    pub fn from_manifest(manifest: &BoardManifest) -> Result<Self> {
        if manifest.platform != Platform::Avr {
            bail!(
                "board '{}' is not an AVR board ({:?})",
                manifest.name,
                manifest.platform
            );
        }
        let pin = |binding: &BoardIoBinding| -> Result<u8> {
            u8::try_from(binding.pin).with_context(|| {
                format!("board_io '{}' pin {} out of range", binding.id, binding.pin)
            })
        };
        let led = lookup(manifest, LED_ID, BoardIoKind::Led, BoardIoSignal::Output)?;
        let button = lookup(manifest, BUTTON_ID, BoardIoKind::Button, BoardIoSignal::Input)?;
        Ok(Self {
            led: pin(led)?,
            button: pin(button)?,
            led_active_high: led.active_high,
            button_active_high: button.active_high,
        })
    }

    /// Pin level that turns the LED on (`true`) or off.
    pub fn led_level(&self, on: bool) -> Level {
        Level::from(on == self.led_active_high)
    }
}

/// LED and button lines of an STM32 board. Pins are `GPIO_PIN_x` masks;
/// polarity as in [`AvrPins`], with the pull resistor chosen to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stm32Pins {
    pub led_port: GpioPort,
    pub led_pin: u16,
    pub button_port: GpioPort,
    pub button_pin: u16,
    pub led_active_high: bool,
    pub button_active_high: bool,
}

impl Default for Stm32Pins {
    /// Nucleo/Blue Pill style: LED on PC13, user button on PA0 to ground.
    fn default() -> Self {
        Self {
            led_port: GPIOC,
            led_pin: GPIO_PIN_13,
            button_port: GPIOA,
            button_pin: GPIO_PIN_0,
            led_active_high: true,
            button_active_high: false,
        }
    }
}

impl Stm32Pins {
    pub fn from_manifest(manifest: &BoardManifest) -> Result<Self> {
        if manifest.platform != Platform::Stm32 {
            bail!(
                "board '{}' is not an STM32 board ({:?})",
                manifest.name,
                manifest.platform
            );
        }
        let line = |binding: &BoardIoBinding| -> Result<(GpioPort, u16)> {
            let port = GpioPort::try_from(binding.port)
                .map_err(|idx| anyhow!("board_io '{}' has no GPIO port {}", binding.id, idx))?;
            if binding.pin > 15 {
                bail!("board_io '{}' pin {} out of range", binding.id, binding.pin);
            }
            Ok((port, 1u16 << binding.pin))
        };
        let led = lookup(manifest, LED_ID, BoardIoKind::Led, BoardIoSignal::Output)?;
        let button = lookup(manifest, BUTTON_ID, BoardIoKind::Button, BoardIoSignal::Input)?;
        let (led_port, led_pin) = line(led)?;
        let (button_port, button_pin) = line(button)?;
        Ok(Self {
            led_port,
            led_pin,
            button_port,
            button_pin,
            led_active_high: led.active_high,
            button_active_high: button.active_high,
        })
    }

    /// Pin state that turns the LED on (`true`) or off.
    pub fn led_state(&self, on: bool) -> GpioPinState {
        Level::from(on == self.led_active_high).into()
    }
}

fn lookup<'a>(
    manifest: &'a BoardManifest,
    id: &str,
    kind: BoardIoKind,
    signal: BoardIoSignal,
) -> Result<&'a BoardIoBinding> {
    let binding = manifest
        .binding(id)
        .ok_or_else(|| anyhow!("board '{}' has no '{}' in board_io", manifest.name, id))?;
    if binding.kind != kind {
        bail!(
            "board_io '{}' is a {:?}, expected a {:?}",
            id,
            binding.kind,
            kind
        );
    }
    if binding.signal != signal {
        bail!(
            "board_io '{}' is wired as {:?}, expected {:?}",
            id,
            binding.signal,
            signal
        );
    }
    Ok(binding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEGA: &str = r#"
schema_version: "1.0"
name: "mega"
platform: "avr"
board_io:
  - id: "led"
    kind: "led"
    pin: 12
  - id: "button"
    kind: "button"
    pin: 2
    signal: "input"
"#;

    #[test]
    fn test_avr_pins_from_manifest() {
        let manifest = BoardManifest::from_yaml(MEGA).unwrap();
        let pins = AvrPins::from_manifest(&manifest).unwrap();
        assert_eq!(
            pins,
            AvrPins {
                led: 12,
                button: 2,
                led_active_high: true,
                button_active_high: true,
            }
        );
    }

    #[test]
    fn test_platform_mismatch_is_rejected() {
        let manifest = BoardManifest::from_yaml(MEGA).unwrap();
        let err = Stm32Pins::from_manifest(&manifest).unwrap_err();
        assert!(err.to_string().contains("not an STM32 board"));
    }

    #[test]
    fn test_missing_binding_is_reported() {
        let yaml = r#"
schema_version: "1.0"
name: "bare"
platform: "stm32"
board_io:
  - id: "led"
    kind: "led"
    port: 2
    pin: 13
"#;
        let manifest = BoardManifest::from_yaml(yaml).unwrap();
        let err = Stm32Pins::from_manifest(&manifest).unwrap_err();
        assert!(err.to_string().contains("no 'button'"));
    }

    #[test]
    fn test_led_polarity() {
        let active_high = AvrPins::default();
        assert_eq!(active_high.led_level(true), Level::High);
        assert_eq!(active_high.led_level(false), Level::Low);

        let active_low = AvrPins {
            led_active_high: false,
            ..AvrPins::default()
        };
        assert_eq!(active_low.led_level(true), Level::Low);
        assert_eq!(active_low.led_level(false), Level::High);

        let nucleo = Stm32Pins {
            led_active_high: false,
            ..Stm32Pins::default()
        };
        assert_eq!(nucleo.led_state(true), GpioPinState::Reset);
        assert_eq!(Stm32Pins::default().led_state(true), GpioPinState::Set);
    }

    #[test]
    fn test_led_wired_as_input_is_rejected() {
        let yaml = r#"
name: "mega"
platform: "avr"
board_io:
  - id: "led"
    kind: "led"
    pin: 13
    signal: "input"
  - id: "button"
    kind: "button"
    pin: 23
    signal: "input"
"#;
        let manifest = BoardManifest::from_yaml(yaml).unwrap();
        let err = AvrPins::from_manifest(&manifest).unwrap_err();
        assert!(err.to_string().contains("board_io 'led' is wired as Input"));
    }

    #[test]
    fn test_binding_of_wrong_kind_is_rejected() {
        let yaml = r#"
name: "nucleo"
platform: "stm32"
board_io:
  - id: "led"
    kind: "led"
    port: 2
    pin: 13
  - id: "button"
    kind: "led"
    port: 0
    pin: 0
    signal: "input"
"#;
        let manifest = BoardManifest::from_yaml(yaml).unwrap();
        let err = Stm32Pins::from_manifest(&manifest).unwrap_err();
        assert!(err.to_string().contains("board_io 'button' is a Led, expected a Button"));
    }
}
