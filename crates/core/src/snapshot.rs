// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::interrupt::SourceId;
use crate::signals::Trigger;
use crate::state::PinStateEntry;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimSnapshot {
    pub board: Option<String>,
    pub ticks: u32,
    pub lines: Vec<PinStateEntry>,
    pub dropped_writes: u64,
    pub interrupts: Vec<InterruptSnapshot>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InterruptSnapshot {
    pub source: SourceId,
    pub trigger: Trigger,
    pub armed: bool,
}

impl SimSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
