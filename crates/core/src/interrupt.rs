// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::signals::Trigger;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::rc::Rc;

/// Identifier of an interrupt source (Arduino interrupt number, EXTI line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an interrupt service routine.
///
/// Cloning shares the routine; two handles compare equal when they point at
/// the same routine.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new<F: Fn() + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }

    /// Opaque identity, stable for the lifetime of the routine.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<F: Fn() + 'static> From<F> for Callback {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}

impl Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:#x})", self.id())
    }
}

#[derive(Debug, Clone)]
pub struct AttachedInterrupt {
    pub source: SourceId,
    pub callback: Callback,
    pub trigger: Trigger,
    pub armed: bool,
}

/// Remembers the routine most recently attached to each source.
///
/// Nothing here ever calls a routine on its own: tests fetch the handle and
/// invoke it to stand in for a hardware edge.
#[derive(Debug, Default)]
pub struct InterruptRegistry {
    slots: BTreeMap<SourceId, AttachedInterrupt>,
}

impl InterruptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was attached to `source` and arms it.
    pub fn attach(&mut self, source: SourceId, callback: Callback, trigger: Trigger) {
        if let Some(previous) = self.slots.get(&source) {
            tracing::debug!(
                "Interrupt {}: replacing {:?} with {:?}",
                source,
                previous.callback,
                callback
            );
        }
        self.slots.insert(
            source,
            AttachedInterrupt {
                source,
                callback,
                trigger,
                armed: true,
            },
        );
    }

    /// Disarms `source`. The handle stays fetchable.
    pub fn detach(&mut self, source: SourceId) {
        if let Some(slot) = self.slots.get_mut(&source) {
            slot.armed = false;
        }
    }

    pub fn get(&self, source: SourceId) -> Option<Callback> {
        self.slots.get(&source).map(|s| s.callback.clone())
    }

    /// The handle, but only while the source is armed.
    pub fn armed(&self, source: SourceId) -> Option<Callback> {
        self.slots
            .get(&source)
            .filter(|s| s.armed)
            .map(|s| s.callback.clone())
    }

    pub fn is_armed(&self, source: SourceId) -> bool {
        self.slots.get(&source).is_some_and(|s| s.armed)
    }

    pub fn trigger_mode(&self, source: SourceId) -> Option<Trigger> {
        self.slots.get(&source).map(|s| s.trigger)
    }

    pub fn attached(&self) -> impl Iterator<Item = &AttachedInterrupt> {
        self.slots.values()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_unattached_source() {
        let registry = InterruptRegistry::new();
        assert!(registry.get(SourceId(0)).is_none());
        assert!(!registry.is_armed(SourceId(0)));
    }

    #[test]
    fn test_attach_then_get_returns_same_callback() {
        let mut registry = InterruptRegistry::new();
        let cb = Callback::new(|| {});
        registry.attach(SourceId(5), cb.clone(), Trigger::Falling);

        assert_eq!(registry.get(SourceId(5)), Some(cb));
        assert_eq!(registry.trigger_mode(SourceId(5)), Some(Trigger::Falling));
        assert!(registry.is_armed(SourceId(5)));
    }

    #[test]
    fn test_second_attach_replaces() {
        let mut registry = InterruptRegistry::new();
        let first = Callback::new(|| {});
        let second = Callback::new(|| {});
        registry.attach(SourceId(1), first.clone(), Trigger::Rising);
        registry.attach(SourceId(1), second.clone(), Trigger::Change);

        let stored = registry.get(SourceId(1)).unwrap();
        assert_eq!(stored, second);
        assert_ne!(stored, first);
        assert_eq!(registry.trigger_mode(SourceId(1)), Some(Trigger::Change));
        assert_eq!(registry.attached().count(), 1);
    }

    #[test]
    fn test_detach_disarms_but_keeps_handle() {
        let mut registry = InterruptRegistry::new();
        let cb = Callback::new(|| {});
        registry.attach(SourceId(2), cb.clone(), Trigger::Low);
        registry.detach(SourceId(2));

        assert!(!registry.is_armed(SourceId(2)));
        assert!(registry.armed(SourceId(2)).is_none());
        assert_eq!(registry.get(SourceId(2)), Some(cb));
    }

    fn registered(cb: impl Into<Callback>) -> Callback {
        let mut registry = InterruptRegistry::new();
        registry.attach(SourceId(3), cb.into(), Trigger::Falling);
        registry.get(SourceId(3)).unwrap()
    }

    #[test]
    fn test_existing_handle_keeps_identity() {
        let cb = Callback::new(|| {});
        assert_eq!(registered(cb.clone()), cb);
        // A closure becomes a fresh routine.
        assert_ne!(registered(|| {}), cb);
    }

    #[test]
    fn test_invoke_runs_captured_state() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let cb = Callback::new(move || counter.set(counter.get() + 1));
        cb.invoke();
        cb.clone().invoke();
        assert_eq!(hits.get(), 2);
    }
}
