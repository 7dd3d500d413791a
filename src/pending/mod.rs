//! Pending computations.
//!
//! - [`cell`]: [`Settle`], the shared single-assignment completion cell behind
//!   every async wrapper
//! - [`catch`]: [`CatchPanic`], the adapter that turns a producer panic into data
//! - `driver`: the background thread that finishes computations whose handles
//!   were all dropped
//!
//! Producers are boxed and polled by whichever observer drives them. "Started
//! eagerly" means the producer is polled once when the cell is created. While
//! any handle is alive, progress happens when a handle is polled; once the last
//! handle is gone, the producer's own wakeups drive it on the driver thread.

pub mod catch;
pub mod cell;
pub(crate) mod driver;
pub(crate) mod notify;

pub use catch::CatchPanic;
pub use cell::Settle;
