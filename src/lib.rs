//! Asum: eager-start, lazily-observed async wrappers for `Option` and `Result`.
//!
//! # Overview
//!
//! [`OptionAsync<T>`] and [`ResultAsync<T, E>`] hold a pending computation of
//! an `Option` or a `Result` and offer the same combinators as the synchronous
//! types. A whole chain is built without suspending and awaited once at the
//! end.
//!
//! ```
//! use asum::{OptionAsync, ResultAsync};
//! use futures_lite::future::block_on;
//!
//! let user = ResultAsync::<u32, String>::from_future(async { 7 })
//!     .and_then(|id| if id > 0 { Ok(id) } else { Err("bad id".to_string()) })
//!     .map(|id| format!("user-{id}"));
//! assert_eq!(block_on(user), Ok("user-7".to_string()));
//!
//! let first = OptionAsync::any([OptionAsync::none(), OptionAsync::some(2)]);
//! assert_eq!(block_on(first), Some(2));
//! ```
//!
//! # Core Guarantees
//!
//! - **Eager start**: constructors poll the producer once before returning
//! - **Lazy observation**: chaining methods run no user code at call time
//! - **Resolve once**: every handle to a computation observes the same single
//!   resolution, and each attached callback runs at most once
//! - **Short-circuit**: absent values (`None`, `Err`) flow through chains as
//!   data and skip downstream callbacks
//! - **Ordered aggregation**: `all`, `all_settled` and `any` assemble results
//!   in input order, never completion order
//!
//! # Module Structure
//!
//! - [`sum`]: extensions and panic-catching helpers for `Option`/`Result`
//! - [`pending`]: the shared completion cell and panic adapter
//! - [`wrapper`]: `OptionAsync` and `ResultAsync`
//! - [`combinator`]: `all`, `all_settled`, `any` over many handles
//! - [`bridge`]: `into_async()` and the callback return traits
//! - [`types`]: [`PanicPayload`]
//! - [`error`](mod@error): error types
//! - [`tracing_compat`]: optional tracing integration (requires `tracing-integration` feature)
//!
//! # Execution
//!
//! A computation makes progress whenever a handle to it is polled, on whatever
//! runtime drives that poll. Started computations are never cancelled: when
//! the last handle is dropped before resolution, a background driver thread
//! keeps polling the producer on its own wakeups until it settles. Payloads
//! and callbacks are `Send + 'static`, so handles can move between threads.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
// Async wrappers mirror std's method names on purpose.
#![allow(clippy::should_implement_trait)]

pub mod bridge;
pub mod combinator;
pub mod error;
pub mod pending;
pub mod prelude;
pub mod sum;
pub mod tracing_compat;
pub mod types;
pub mod wrapper;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use bridge::{IntoAsync, IntoOptionAsync, IntoResultAsync};
pub use error::{Error, Result};
pub use sum::{FailureExt, OptionExt, ResultExt, SuccessExt};
pub use types::PanicPayload;
pub use wrapper::{OptionAsync, ResultAsync};
