// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::fmt;
use std::ops::Not;

/// Represents a digital signal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    /// Integer encoding shared by the Arduino and ST HAL APIs.
    pub fn as_raw(self) -> i64 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(b: bool) -> Self {
        if b {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        match level {
            Level::High => true,
            Level::Low => false,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "LOW"),
            Level::High => write!(f, "HIGH"),
        }
    }
}

/// Identity of one simulated digital line: controller instance plus line
/// number within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct LineId {
    pub controller: u8,
    pub line: u16,
}

impl LineId {
    pub const fn new(controller: u8, line: u16) -> Self {
        Self { controller, line }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.controller, self.line)
    }
}

/// Edge or level condition an interrupt source fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Low,
    High,
    Change,
    Rising,
    Falling,
}
