//! Fan-out waker for shared completion cells.
//!
//! A cell's producer is polled by whichever observer happens to drive it, but
//! every observer must hear about progress. [`Notifier`] keeps one waker slot
//! per observer and is itself the waker handed to the producer: waking it wakes
//! every registered observer.
//!
//! Once every handle is gone the cell is parked here as a detached task, and
//! each wakeup also queues a poll of it on the [driver](super::driver).

use super::driver::{self, Task};
use parking_lot::Mutex;
use slab::Slab;
use std::fmt;
use std::sync::Arc;
use std::task::{Wake, Waker};

/// Registry of observer wakers, usable as a waker itself.
#[derive(Default)]
pub(crate) struct Notifier {
    wakers: Mutex<Slab<Option<Waker>>>,
    detached: Mutex<Option<Task>>,
}

impl Notifier {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Records `waker` for the observer identified by `key`, allocating a slot
    /// on first registration.
    pub(crate) fn register(&self, key: &mut Option<usize>, waker: &Waker) {
        let mut wakers = self.wakers.lock();
        let slot = match *key {
            Some(k) => wakers.get_mut(k),
            None => None,
        };
        if let Some(slot) = slot {
            if !slot.as_ref().is_some_and(|existing| existing.will_wake(waker)) {
                *slot = Some(waker.clone());
            }
            return;
        }
        *key = Some(wakers.insert(Some(waker.clone())));
    }

    /// Releases the observer's slot.
    pub(crate) fn deregister(&self, key: usize) {
        let mut wakers = self.wakers.lock();
        if wakers.contains(key) {
            wakers.remove(key);
        }
    }

    /// Wakes every registered observer. Slots are emptied; observers that poll
    /// again re-register.
    pub(crate) fn notify_all(&self) {
        let pending: Vec<Waker> = {
            let mut wakers = self.wakers.lock();
            wakers.iter_mut().filter_map(|(_, slot)| slot.take()).collect()
        };
        for waker in pending {
            waker.wake();
        }
    }

    /// Number of observers with a live slot.
    pub(crate) fn observers(&self) -> usize {
        self.wakers.lock().len()
    }

    pub(crate) fn waker(self: &Arc<Self>) -> Waker {
        Waker::from(Arc::clone(self))
    }

    /// Parks a released computation and queues its first detached poll.
    pub(crate) fn detach(&self, task: Task) {
        *self.detached.lock() = Some(Arc::clone(&task));
        driver::schedule(task);
    }

    /// Drops the parked computation once it has settled.
    pub(crate) fn release(&self) {
        self.detached.lock().take();
    }

    fn wake_all(&self) {
        self.notify_all();
        let detached = self.detached.lock().clone();
        if let Some(task) = detached {
            driver::schedule(task);
        }
    }
}

impl Wake for Notifier {
    fn wake(self: Arc<Self>) {
        self.wake_all();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.wake_all();
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers())
            .field("detached", &self.detached.lock().is_some())
            .finish()
    }
}
