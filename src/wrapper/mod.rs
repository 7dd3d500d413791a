//! Async wrappers over `Option` and `Result`.
//!
//! Both wrappers are thin handles over a shared [`Settle`](crate::pending::Settle)
//! cell. They implement [`Future`](std::future::Future) directly, so `.await`
//! is the conversion back to the synchronous value.

pub mod option;
pub mod result;

pub use option::OptionAsync;
pub use result::ResultAsync;
