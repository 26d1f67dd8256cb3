//! Layout notifications for widgets whose width is not known yet.
//!
//! A widget asked to show text before its host has measured it cannot
//! truncate. It registers a one-shot listener here instead; the host
//! dispatches a `LayoutEvent` once measurement is available and every
//! pending listener runs exactly once.
//!
//! Listeners are removed from the registry *before* they run, so a second
//! dispatch (the host lays out again on every frame) never re-runs them.
//! The registry is single-threaded; listeners are plain `FnOnce` boxes that
//! receive the owner by `&mut`, which keeps the owner from having to share
//! itself through `Rc<RefCell<_>>`.

use tracing::trace;

/// Measurement delivered by a host layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEvent {
    /// Full measured width of the widget, padding included.
    pub width: u32,
}

impl LayoutEvent {
    pub const fn new(width: u32) -> Self {
        Self { width }
    }
}

/// Handle returned on registration; used to cancel a pending listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub type OneShot<T> = Box<dyn FnOnce(&mut T, &LayoutEvent)>;

/// Registry of single-fire layout listeners owned by `T`.
pub struct LayoutObserver<T> {
    pending: Vec<(ListenerId, OneShot<T>)>,
    next_id: u64,
    fired: u64,
}

impl<T> Default for LayoutObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for LayoutObserver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutObserver")
            .field("pending", &self.pending.len())
            .field("fired", &self.fired)
            .finish()
    }
}

impl<T> LayoutObserver<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
            fired: 0,
        }
    }

    /// Register a listener that runs on the next dispatch only.
    pub fn register_once<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnOnce(&mut T, &LayoutEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, Box::new(listener)));
        trace!(target: "layout", id = id.0, pending = self.pending.len(), "listener_registered");
        id
    }

    /// Cancel a pending listener. Returns false if it already ran or was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pid, _)| *pid != id);
        before != self.pending.len()
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.pending.iter().any(|(pid, _)| *pid == id)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total listeners handed out by `take_pending` so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Deregister and return every pending listener in registration order.
    ///
    /// The caller runs them; anything they register lands in the (now empty)
    /// registry and waits for the next layout pass.
    pub fn take_pending(&mut self) -> Vec<OneShot<T>> {
        let taken: Vec<_> = self.pending.drain(..).map(|(_, f)| f).collect();
        self.fired += taken.len() as u64;
        taken
    }

    /// Convenience for owners that are not themselves holding the observer.
    pub fn dispatch(&mut self, target: &mut T, event: LayoutEvent) -> usize {
        let listeners = self.take_pending();
        let count = listeners.len();
        for listener in listeners {
            listener(target, &event);
        }
        count
    }
}
