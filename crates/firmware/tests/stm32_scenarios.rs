// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use pinspy_config::BoardManifest;
use pinspy_core::{MockSupport, Session};
use pinspy_firmware::stm32::{Blink, InterruptGatedBlink, NonBlockingBlink, ToggleOnInterrupt};
use pinspy_firmware::{Sketch, Stm32Pins};
use pinspy_stm32::*;
use std::path::PathBuf;

fn session() -> (MockSupport, Session) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    let mock = MockSupport::new();
    let session = Session::start(mock.clone());
    (mock, session)
}

fn expect_led_and_button_setup(mock: &MockSupport, isr: &Callback) {
    mock.expect_one_call("HAL_GPIO_Init")
        .with_parameter("GPIOx", GPIOC)
        .with_parameter("Pin", GPIO_PIN_13)
        .with_parameter("Mode", GPIO_MODE_OUTPUT_PP);
    mock.expect_one_call("HAL_GPIO_WritePin")
        .with_parameter("GPIOx", GPIOC)
        .with_parameter("GPIO_Pin", GPIO_PIN_13)
        .with_parameter("PinState", GPIO_PIN_RESET);
    mock.expect_one_call("HAL_GPIO_Init")
        .with_parameter("GPIOx", GPIOA)
        .with_parameter("Pin", GPIO_PIN_0)
        .with_parameter("Mode", GPIO_MODE_IT_FALLING)
        .with_parameter("Pull", GPIO_PULLUP);
    mock.expect_one_call("GPIO_PinToExtiLine")
        .with_parameter("GPIO_Pin", GPIO_PIN_0);
    mock.expect_one_call("HAL_EXTI_RegisterCallback")
        .with_parameter("ExtiLine", GPIO_PIN_0)
        .with_parameter("Callback", isr)
        .with_parameter("Trigger", EXTI_TRIGGER_FALLING);
}

fn toggle_count(mock: &MockSupport) -> usize {
    mock.calls_to("HAL_GPIO_TogglePin").len()
}

#[test]
fn test_blink_loop() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    let mut sketch = Blink::new(Stm32Pins::default());
    sketch.setup();
    mock.clear();

    mock.strict_order();
    for _ in 0..3 {
        mock.expect_one_call("HAL_GPIO_TogglePin")
            .with_parameter("GPIOx", GPIOC)
            .with_parameter("GPIO_Pin", GPIO_PIN_13);
        mock.expect_one_call("HAL_Delay").with_parameter("Delay", 1000);
    }
    sketch.run_loops(3);
    mock.check_expectations();
    assert_eq!(sim::current_tick(), 3000);
    assert_eq!(sim::pin_state(GPIOC, GPIO_PIN_13), GPIO_PIN_SET);
}

#[test]
fn test_toggle_on_interrupt() {
    let (mock, _session) = session();
    let mut sketch = ToggleOnInterrupt::new(Stm32Pins::default());

    expect_led_and_button_setup(&mock, &sketch.isr());
    sketch.setup();
    mock.check_expectations();
    mock.clear();

    mock.expect_no_call("HAL_GPIO_WritePin");
    mock.ignore_other_calls();
    sketch.run_loops(5);
    mock.check_expectations();
    mock.clear();

    let isr = sim::registered_callback(GPIO_PIN_0).expect("EXTI callback registered");
    isr.invoke();
    assert!(sketch.is_toggling());

    mock.strict_order();
    for state in [
        GPIO_PIN_RESET,
        GPIO_PIN_SET,
        GPIO_PIN_RESET,
        GPIO_PIN_SET,
        GPIO_PIN_RESET,
    ] {
        mock.expect_one_call("HAL_GPIO_WritePin")
            .with_parameter("GPIOx", GPIOC)
            .with_parameter("GPIO_Pin", GPIO_PIN_13)
            .with_parameter("PinState", state);
    }
    sketch.run_loops(5);
    mock.check_expectations();
}

#[test]
fn test_exti_line_override_is_honoured() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    mock.expect_one_call("GPIO_PinToExtiLine").and_return_value(0);

    let mut sketch = ToggleOnInterrupt::new(Stm32Pins::default());
    sketch.setup();

    assert!(sim::is_armed(0));
    assert!(!sim::is_armed(GPIO_PIN_0));
    assert!(sim::trigger(0));
    assert!(sketch.is_toggling());
}

#[test]
fn test_nonblocking_blink_follows_the_tick() {
    let (mock, _session) = session();
    mock.expect_no_call("HAL_Delay");
    mock.ignore_other_calls();

    let mut sketch = NonBlockingBlink::new(Stm32Pins::default());
    sketch.setup();

    let mut toggled_at = Vec::new();
    for tick in [0, 500, 1000, 1500, 1999, 2000, 2500, 3000] {
        sim::set_tick(tick);
        let before = toggle_count(&mock);
        sketch.run_loop();
        if toggle_count(&mock) > before {
            toggled_at.push(tick);
        }
    }

    assert_eq!(toggled_at, vec![1000, 2000, 3000]);
    assert_eq!(sim::pin_state(GPIOC, GPIO_PIN_13), GPIO_PIN_SET);
    mock.check_expectations();
}

#[test]
fn test_nonblocking_blink_with_tick_overrides() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    let mut sketch = NonBlockingBlink::new(Stm32Pins::default());
    sketch.setup();
    mock.clear();

    mock.strict_order();
    mock.expect_one_call("HAL_GetTick").and_return_value(400);
    mock.expect_one_call("HAL_GetTick").and_return_value(1200);
    mock.expect_one_call("HAL_GPIO_TogglePin");
    mock.expect_one_call("HAL_GetTick").and_return_value(2100);
    mock.expect_one_call("HAL_GetTick").and_return_value(2200);
    mock.expect_one_call("HAL_GPIO_TogglePin");
    sketch.run_loops(4);
    mock.check_expectations();
}

#[test]
fn test_interrupt_gated_blink() {
    let (mock, _session) = session();
    let mut sketch = InterruptGatedBlink::new(Stm32Pins::default());
    expect_led_and_button_setup(&mock, &sketch.isr());
    sketch.setup();
    mock.check_expectations();
    mock.clear();

    mock.expect_no_call("HAL_GPIO_TogglePin");
    mock.expect_no_call("HAL_GPIO_WritePin");
    mock.expect_no_call("HAL_Delay");
    sketch.run_loops(5);
    mock.check_expectations();
    mock.clear();

    assert!(sim::trigger(GPIO_PIN_0));
    mock.expect_n_calls(3, "HAL_GPIO_TogglePin")
        .with_parameter("GPIOx", GPIOC)
        .with_parameter("GPIO_Pin", GPIO_PIN_13);
    mock.expect_n_calls(3, "HAL_Delay").with_parameter("Delay", 500);
    sketch.run_loops(3);
    mock.check_expectations();
    assert_eq!(sim::current_tick(), 1500);
    assert_eq!(sim::pin_state(GPIOC, GPIO_PIN_13), GPIO_PIN_SET);
    mock.clear();

    assert!(sim::trigger(GPIO_PIN_0));
    assert!(!sketch.is_blinking());
    mock.expect_no_call("HAL_GPIO_TogglePin");
    mock.expect_no_call("HAL_Delay");
    sketch.run_loops(5);
    mock.check_expectations();
    assert_eq!(sim::current_tick(), 1500);
}

#[test]
fn test_cleared_exti_line_stops_gating() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    let mut sketch = InterruptGatedBlink::new(Stm32Pins::default());
    sketch.setup();

    hal_exti_clear_config_line(GPIO_PIN_0);
    assert!(!sim::trigger(GPIO_PIN_0));
    sketch.run_loops(2);
    assert_eq!(toggle_count(&mock), 0);

    // A test may still run the routine it fetched.
    sim::registered_callback(GPIO_PIN_0).unwrap().invoke();
    assert!(sketch.is_blinking());
}

#[test]
fn test_board_manifest_pins() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("boards/nucleo_f401re.yaml");
    let manifest = BoardManifest::from_file(path).unwrap();
    let pins = Stm32Pins::from_manifest(&manifest).unwrap();
    assert_eq!(pins, Stm32Pins::default());

    let mock = MockSupport::new();
    mock.ignore_other_calls();
    let _session = Session::from_manifest(&manifest, mock.clone());
    let mut sketch = InterruptGatedBlink::new(pins);
    sketch.setup();
    sim::trigger(GPIO_PIN_0);
    sketch.run_loop();

    let snapshot = pinspy_core::sim::snapshot();
    assert_eq!(snapshot.board.as_deref(), Some("nucleo-f401re"));
    assert_eq!(snapshot.ticks, 500);
    assert_eq!(snapshot.lines.len(), 1);
    assert_eq!(snapshot.to_json()["ticks"], 500);
}

#[test]
#[should_panic(expected = "out of order call: HAL_GPIO_Init")]
fn test_strict_order_catches_reordered_setup() {
    let (mock, _session) = session();
    mock.strict_order();
    mock.expect_one_call("HAL_GPIO_WritePin");
    mock.expect_one_call("HAL_GPIO_Init");
    ToggleOnInterrupt::new(Stm32Pins::default()).setup();
}

const INVERTED_BOARD: &str = r#"
name: "nucleo-inverted"
platform: "stm32"
board_io:
  - id: "led"
    kind: "led"
    port: 2
    pin: 13
    active_high: false
  - id: "button"
    kind: "button"
    port: 0
    pin: 0
    signal: "input"
    active_high: true
"#;

fn inverted_pins() -> Stm32Pins {
    let manifest = BoardManifest::from_yaml(INVERTED_BOARD).unwrap();
    Stm32Pins::from_manifest(&manifest).unwrap()
}

#[test]
fn test_active_low_led_starts_dark_and_toggles() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    let mut sketch = ToggleOnInterrupt::new(inverted_pins());
    sketch.setup();
    assert_eq!(sim::pin_state(GPIOC, GPIO_PIN_13), GPIO_PIN_SET);

    assert!(sim::trigger(GPIO_PIN_0));
    sketch.run_loops(3);
    let states: Vec<_> = mock
        .calls_to("HAL_GPIO_WritePin")
        .iter()
        .filter_map(|c| c.param("PinState").cloned())
        .collect();
    let expected: Vec<_> = [GPIO_PIN_SET, GPIO_PIN_SET, GPIO_PIN_RESET, GPIO_PIN_SET]
        .into_iter()
        .map(pinspy_core::Value::from)
        .collect();
    assert_eq!(states, expected);
}

#[test]
fn test_active_high_button_is_caught_rising() {
    let (mock, _session) = session();
    mock.ignore_other_calls();
    let mut sketch = InterruptGatedBlink::new(inverted_pins());

    mock.expect_one_call("HAL_GPIO_Init").with_parameter("GPIOx", GPIOC);
    mock.expect_one_call("HAL_GPIO_Init")
        .with_parameter("GPIOx", GPIOA)
        .with_parameter("Mode", GPIO_MODE_IT_RISING)
        .with_parameter("Pull", GPIO_PULLDOWN);
    mock.expect_one_call("HAL_EXTI_RegisterCallback")
        .with_parameter("Callback", &sketch.isr())
        .with_parameter("Trigger", EXTI_TRIGGER_RISING);
    sketch.setup();
    mock.check_expectations();
}
