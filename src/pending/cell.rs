//! Single-assignment completion cell.
//!
//! [`Settle<V>`] is a reference-counted handle to one pending computation. The
//! computation is a boxed future stored in the cell; it is polled by whichever
//! handle is being polled, resolves at most once, and every handle observes the
//! same resolution.
//!
//! Dropping every handle does not cancel a computation that has started: the
//! cell is handed to the background driver, which polls it to completion. A
//! lazy cell that was never polled has not started and is simply dropped.
//!
//! # States
//!
//! ```text
//! Pending(future) --poll--> Polling --Ready--> Ready(value) --last observer--> Taken
//!        ^                     |
//!        +------Pending--------+--panic--> Panicked
//! ```
//!
//! # Observers
//!
//! Cloning a handle (only possible when `V: Clone`) adds an observer. The last
//! live handle to observe the value moves it out; earlier ones receive clones.
//! A clone of a handle that has already completed is itself complete.
//!
//! # Panics
//!
//! A panic while polling the producer is caught. If a handle was polling, that
//! handle re-raises the original panic immediately. If the panic happened
//! during the eager first poll, the payload is parked in the cell and the first
//! observer re-raises it. Any other observer panics with
//! [`Error::Poisoned`](crate::error::Error::Poisoned).

use super::driver::{Detached, Task};
use super::notify::Notifier;
use crate::error::Error;
use crate::tracing_compat::{trace, warn};
use crate::types::PanicPayload;
use futures_lite::future::Boxed;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::mem;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

enum State<V> {
    Pending(Boxed<V>),
    Polling,
    Ready(V),
    Taken,
    Panicked {
        raw: Option<Box<dyn Any + Send>>,
        payload: PanicPayload,
    },
}

impl<V> State<V> {
    const fn label(&self) -> &'static str {
        match self {
            Self::Pending(_) => "pending",
            Self::Polling => "polling",
            Self::Ready(_) => "ready",
            Self::Taken => "taken",
            Self::Panicked { .. } => "panicked",
        }
    }
}

/// Outcome of one attempt to drive the producer.
enum Progress {
    Pending,
    Settled,
    Panicked(Box<dyn Any + Send>),
}

struct Inner<V> {
    state: Mutex<State<V>>,
    notifier: Arc<Notifier>,
    share: OnceLock<fn(&V) -> V>,
    handles: AtomicUsize,
    started: AtomicBool,
    detach: fn(&Arc<Self>) -> Task,
}

fn erase<V: Send + 'static>(inner: &Arc<Inner<V>>) -> Task {
    Arc::clone(inner) as Task
}

impl<V: Send + 'static> Inner<V> {
    fn new(state: State<V>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            notifier: Notifier::new(),
            share: OnceLock::new(),
            handles: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            detach: erase::<V>,
        })
    }
}

impl<V: Send + 'static> Detached for Inner<V> {
    fn run(&self) {
        match self.drive() {
            Progress::Pending => {}
            Progress::Settled => {
                trace!("released computation resolved");
                self.notifier.release();
            }
            Progress::Panicked(raw) => {
                drop(raw);
                self.notifier.release();
            }
        }
    }
}

impl<V> Inner<V> {
    /// Polls the producer once if nobody else is polling it.
    fn drive(&self) -> Progress {
        let mut future = {
            let mut state = self.state.lock();
            match mem::replace(&mut *state, State::Polling) {
                State::Pending(future) => {
                    self.started.store(true, Ordering::Release);
                    future
                }
                State::Polling => return Progress::Pending,
                settled => {
                    *state = settled;
                    return Progress::Settled;
                }
            }
        };

        let waker = self.notifier.waker();
        let mut cx = Context::from_waker(&waker);
        match catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(&mut cx))) {
            Ok(Poll::Pending) => {
                *self.state.lock() = State::Pending(future);
                Progress::Pending
            }
            Ok(Poll::Ready(value)) => {
                *self.state.lock() = State::Ready(value);
                trace!(
                    observers = self.notifier.observers(),
                    "pending computation resolved"
                );
                self.notifier.notify_all();
                Progress::Settled
            }
            Err(raw) => {
                drop(future);
                let payload = PanicPayload::from_panic(raw.as_ref());
                warn!(panic = %payload, "pending computation panicked");
                *self.state.lock() = State::Panicked { raw: None, payload };
                self.notifier.notify_all();
                Progress::Panicked(raw)
            }
        }
    }

    /// Hands the settled value to one observer.
    fn observe(self: &Arc<Self>) -> V {
        let mut state = self.state.lock();
        match mem::replace(&mut *state, State::Taken) {
            State::Ready(value) => {
                if self.handles.load(Ordering::Acquire) == 1 {
                    return value;
                }
                let share = *self
                    .share
                    .get()
                    .expect("multiple observers imply a cloneable payload");
                let observed = share(&value);
                *state = State::Ready(value);
                observed
            }
            State::Panicked {
                raw: Some(raw),
                payload,
            } => {
                *state = State::Panicked { raw: None, payload };
                drop(state);
                resume_unwind(raw)
            }
            State::Panicked { raw: None, payload } => {
                *state = State::Panicked {
                    raw: None,
                    payload: payload.clone(),
                };
                drop(state);
                panic!("{}", Error::Poisoned(payload))
            }
            State::Taken => {
                drop(state);
                panic!("pending computation value was already moved out by its last observer")
            }
            unsettled @ (State::Pending(_) | State::Polling) => {
                let label = unsettled.label();
                *state = unsettled;
                drop(state);
                unreachable!("observed a {label} computation")
            }
        }
    }
}

/// Handle to a shared, single-assignment pending computation.
///
/// `Settle` is itself a [`Future`] resolving to the computation's value.
#[must_use = "futures do nothing unless polled"]
pub struct Settle<V> {
    inner: Arc<Inner<V>>,
    key: Option<usize>,
    done: bool,
}

impl<V: Send + 'static> Settle<V> {
    /// A cell that is already resolved to `value`.
    pub(crate) fn resolved(value: V) -> Self {
        trace!(state = "ready", "pending computation created");
        Self::from_inner(Inner::new(State::Ready(value)))
    }

    /// A cell whose producer is not polled until the first observer polls it.
    pub(crate) fn lazy(future: Boxed<V>) -> Self {
        trace!(state = "lazy", "pending computation created");
        Self::from_inner(Inner::new(State::Pending(future)))
    }

    /// A cell whose producer is polled once before this returns, so its
    /// synchronous prefix has run by the time the handle exists.
    pub(crate) fn eager(future: Boxed<V>) -> Self {
        trace!(state = "eager", "pending computation created");
        let inner = Inner::new(State::Pending(future));
        inner.handles.fetch_add(1, Ordering::AcqRel);
        if let Progress::Panicked(raw) = inner.drive() {
            let mut state = inner.state.lock();
            if let State::Panicked { raw: parked, .. } = &mut *state {
                *parked = Some(raw);
            }
        }
        Self {
            inner,
            key: None,
            done: false,
        }
    }
}

impl<V> Settle<V> {
    fn from_inner(inner: Arc<Inner<V>>) -> Self {
        inner.handles.fetch_add(1, Ordering::AcqRel);
        Self {
            inner,
            key: None,
            done: false,
        }
    }

    /// Returns `true` once the computation has produced a value or panicked.
    pub(crate) fn is_settled(&self) -> bool {
        !matches!(
            &*self.inner.state.lock(),
            State::Pending(_) | State::Polling
        )
    }

    /// Drives the computation and, once it is settled, observes it.
    pub(crate) fn poll_settled(&mut self, cx: &mut Context<'_>) -> Poll<V> {
        assert!(!self.done, "pending computation polled after completion");
        self.inner.notifier.register(&mut self.key, cx.waker());
        match self.inner.drive() {
            Progress::Pending => return Poll::Pending,
            Progress::Settled => {}
            Progress::Panicked(raw) => {
                self.finish();
                resume_unwind(raw)
            }
        }
        self.finish();
        Poll::Ready(self.inner.observe())
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(key) = self.key.take() {
            self.inner.notifier.deregister(key);
        }
    }
}

impl<V> Future for Settle<V> {
    type Output = V;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<V> {
        self.get_mut().poll_settled(cx)
    }
}

/// Adds an observer of the same computation.
///
/// Cloning a handle that has already returned its value yields a handle that
/// is also complete: polling it panics like polling the original again would.
impl<V: Clone> Clone for Settle<V> {
    fn clone(&self) -> Self {
        let _ = self.inner.share.set(V::clone);
        let mut clone = Self::from_inner(Arc::clone(&self.inner));
        clone.done = self.done;
        clone
    }
}

impl<V> Drop for Settle<V> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.inner.notifier.deregister(key);
        }
        if self.inner.handles.fetch_sub(1, Ordering::AcqRel) != 1 {
            return;
        }
        let running = self.inner.started.load(Ordering::Acquire)
            && matches!(&*self.inner.state.lock(), State::Pending(_));
        if running {
            trace!("last handle released a running computation");
            self.inner.notifier.detach((self.inner.detach)(&self.inner));
        }
    }
}

impl<V> fmt::Debug for Settle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settle")
            .field("state", &self.inner.state.lock().label())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
