#![forbid(unsafe_code)]

//! Host registrations and snapshot delivery.
//!
//! The controller owns an explicit list of cancellable host registrations -
//! a [`SubscriptionSet`] - released together on shutdown (and on drop, so
//! registrations cannot leak past the controller's lifetime).
//!
//! Snapshots travel through an mpsc [`EventQueue`]: host callbacks push
//! [`HostEvent`]s from wherever the host fires them, and the controller
//! drains them one at a time, preserving the cooperative
//! run-to-completion model.

use std::sync::mpsc;

use paneguard_core::HostEvent;

/// A cancellable host registration.
pub trait Disposable: Send {
    /// Release the registration.
    fn dispose(self: Box<Self>);
}

impl<F: FnOnce() + Send> Disposable for F {
    fn dispose(self: Box<Self>) {
        (*self)()
    }
}

/// Explicit list of host registrations, released together.
#[derive(Default)]
pub struct SubscriptionSet {
    items: Vec<Box<dyn Disposable>>,
}

impl SubscriptionSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a registration.
    pub fn push(&mut self, disposable: Box<dyn Disposable>) {
        self.items.push(disposable);
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True iff nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Release every registration, in registration order.
    pub fn dispose_all(&mut self) {
        let count = self.items.len();
        for item in self.items.drain(..) {
            item.dispose();
        }
        if count > 0 {
            tracing::debug!(target: "paneguard.subscriptions", count, "registrations released");
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

/// Sending half of the snapshot channel; clone one per host callback.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<HostEvent>,
}

impl EventSender {
    /// Enqueue a snapshot. Returns false if the queue is gone.
    pub fn send(&self, event: HostEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiving half: the controller drains pending snapshots in order.
pub struct EventQueue {
    rx: mpsc::Receiver<HostEvent>,
}

impl EventQueue {
    /// Create a connected sender/queue pair.
    #[must_use]
    pub fn channel() -> (EventSender, EventQueue) {
        let (tx, rx) = mpsc::channel();
        (EventSender { tx }, EventQueue { rx })
    }

    /// Drain every pending snapshot without blocking.
    pub fn drain(&self) -> Vec<HostEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
