// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::signals::{Level, LineId};
use pinspy_config::CapacityPolicy;

/// Last written level of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PinStateEntry {
    pub line: LineId,
    pub level: Level,
}

/// Fixed-capacity table of simulated line levels.
///
/// Entries are allocated on first write and never removed. Once every slot is
/// taken, writes to new lines are dropped according to the configured
/// [`CapacityPolicy`].
#[derive(Debug)]
pub struct StateStore {
    entries: Vec<PinStateEntry>,
    capacity: usize,
    policy: CapacityPolicy,
    dropped_writes: u64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(100, CapacityPolicy::default())
    }
}

impl StateStore {
    pub fn new(capacity: usize, policy: CapacityPolicy) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            policy,
            dropped_writes: 0,
        }
    }

    fn find(&self, line: LineId) -> Option<usize> {
        self.entries.iter().position(|e| e.line == line)
    }

    pub fn write(&mut self, line: LineId, level: Level) {
        if let Some(idx) = self.find(line) {
            self.entries[idx].level = level;
            return;
        }

        if self.entries.len() >= self.capacity {
            self.dropped_writes += 1;
            match self.policy {
                CapacityPolicy::Ignore => {}
                CapacityPolicy::Warn => tracing::warn!(
                    "State store full ({} entries), dropping write {} <- {}",
                    self.capacity,
                    line,
                    level
                ),
                CapacityPolicy::Panic => panic!(
                    "state store full ({} entries): cannot track line {}",
                    self.capacity, line
                ),
            }
            return;
        }

        tracing::debug!("State store: new entry {} = {}", line, level);
        self.entries.push(PinStateEntry { line, level });
    }

    pub fn read(&self, line: LineId) -> Level {
        self.find(line)
            .map(|idx| self.entries[idx].level)
            .unwrap_or_default()
    }

    /// Flips a stored level. Lines that were never written stay untracked.
    pub fn toggle(&mut self, line: LineId) {
        if let Some(idx) = self.find(line) {
            let entry = &mut self.entries[idx];
            entry.level = !entry.level;
        }
    }

    pub fn contains(&self, line: LineId) -> bool {
        self.find(line).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes
    }

    pub fn entries(&self) -> impl Iterator<Item = &PinStateEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped_writes = 0;
    }
}
