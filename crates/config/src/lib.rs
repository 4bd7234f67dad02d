// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub const SCHEMA_VERSION: &str = "1.0";

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_state_capacity() -> usize {
    100
}

fn default_times() -> usize {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "arduino", alias = "atmega328p", alias = "atmega2560")]
    Avr,
    #[serde(alias = "stm32f1", alias = "stm32f4", alias = "stm32l4")]
    Stm32,
}

/// What the state store does when a write would need a slot it doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapacityPolicy {
    Ignore,
    #[default]
    Warn,
    Panic,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    #[serde(default = "default_state_capacity")]
    pub state_capacity: usize,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
    #[serde(default)]
    pub initial_ticks: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            state_capacity: default_state_capacity(),
            capacity_policy: CapacityPolicy::default(),
            initial_ticks: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoardIoKind {
    Led,
    Button,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoardIoSignal {
    #[default]
    Output,
    Input,
}

/// A named board line. `port` is the controller instance (always 0 on AVR
/// boards, the GPIO port index on STM32 parts), `pin` the line number.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BoardIoBinding {
    pub id: String,
    pub kind: BoardIoKind,
    #[serde(default)]
    pub port: u8,
    pub pin: u16,
    #[serde(default)]
    pub signal: BoardIoSignal,
    #[serde(default = "default_true")]
    pub active_high: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BoardManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub name: String,
    pub platform: Platform,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub board_io: Vec<BoardIoBinding>,
}

impl BoardManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read board manifest at {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Board Manifest YAML")?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        if self.name.trim().is_empty() {
            anyhow::bail!("Board 'name' cannot be empty");
        }

        if self.simulation.state_capacity == 0 {
            anyhow::bail!("Setting 'state_capacity' must be greater than zero");
        }

        let mut seen = HashSet::new();
        for binding in &self.board_io {
            if !seen.insert(binding.id.as_str()) {
                anyhow::bail!("Duplicate board_io id '{}'", binding.id);
            }
            if self.platform == Platform::Avr && binding.port != 0 {
                anyhow::bail!(
                    "board_io '{}' uses port {}; AVR boards only have port 0",
                    binding.id,
                    binding.port
                );
            }
            if self.platform == Platform::Stm32 && binding.pin > 15 {
                anyhow::bail!(
                    "board_io '{}' uses pin {}; STM32 GPIO ports have pins 0-15",
                    binding.id,
                    binding.pin
                );
            }
        }

        Ok(())
    }

    pub fn binding(&self, id: &str) -> Option<&BoardIoBinding> {
        self.board_io.iter().find(|b| b.id == id)
    }
}

/// Parameter and return values as they appear in expectation scripts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScriptValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExpectedCall {
    pub call: String,
    #[serde(default = "default_times")]
    pub times: usize,
    #[serde(default)]
    pub params: BTreeMap<String, ScriptValue>,
    #[serde(default)]
    pub returns: Option<ScriptValue>,
}

/// A canned set of expectations, loaded from YAML.
///
/// ```yaml
/// schema_version: "1.0"
/// ignore_other_calls: true
/// expectations:
///   - call: digitalWrite
///     params: { pin: 13, value: 0 }
///   - call: millis
///     returns: 1000
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExpectationScript {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub ignore_other_calls: bool,
    #[serde(default)]
    pub strict_order: bool,
    #[serde(default)]
    pub expectations: Vec<ExpectedCall>,
}

impl ExpectationScript {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read expectation script at {:?}", path.as_ref())
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let script: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Expectation Script YAML")?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        for (idx, expected) in self.expectations.iter().enumerate() {
            if expected.call.trim().is_empty() {
                anyhow::bail!("Expectation #{} has an empty 'call' name", idx);
            }
            if expected.times == 0 && expected.returns.is_some() {
                anyhow::bail!(
                    "Expectation '{}' forbids the call but declares a return value",
                    expected.call
                );
            }
        }

        Ok(())
    }
}
