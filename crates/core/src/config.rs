// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use pinspy_config::{BoardManifest, CapacityPolicy, Platform, SimulationSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board the simulation stands in for, if it was built from a manifest.
    pub board: Option<String>,
    pub platform: Option<Platform>,
    /// Maximum number of distinct lines the state store tracks.
    pub state_capacity: usize,
    /// What happens to writes once the state store is full.
    pub capacity_policy: CapacityPolicy,
    /// Tick counter value at session start.
    pub initial_ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from(&SimulationSettings::default())
    }
}

impl From<&SimulationSettings> for SimulationConfig {
    fn from(settings: &SimulationSettings) -> Self {
        Self {
            board: None,
            platform: None,
            state_capacity: settings.state_capacity,
            capacity_policy: settings.capacity_policy,
            initial_ticks: settings.initial_ticks,
        }
    }
}

impl From<&BoardManifest> for SimulationConfig {
    fn from(manifest: &BoardManifest) -> Self {
        Self {
            board: Some(manifest.name.clone()),
            platform: Some(manifest.platform),
            ..Self::from(&manifest.simulation)
        }
    }
}
