// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Platform-neutral behaviour of each peripheral operation class.
//!
//! Platform crates build the [`CallEvent`](crate::CallEvent) with their own
//! API's names and argument encodings, then hand it here together with the
//! simulated identity the operation acts on.

pub mod exti;
pub mod gpio;
pub mod systick;
