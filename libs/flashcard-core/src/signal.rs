//! Observer registration for change notifications.

use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect a slot later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of callbacks invoked with every emitted event.
///
/// Slots are owned by the signal, so a slot never outlives the component
/// that owns the signal.
pub struct Signal<E> {
    next_id: u64,
    slots: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
}

impl<E> Signal<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }

    /// Register a slot. Slots run in connection order.
    pub fn connect<F>(&mut self, slot: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Remove a slot. Returns false if the id was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, slot) in &mut self.slots {
            slot(event);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.len())
            .finish()
    }
}
