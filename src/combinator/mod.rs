//! Aggregation combinators over many pending handles.
//!
//! - [`all`]: every handle present, short-circuiting on the first absent one by index
//! - [`all_settled`]: wait for every handle, collecting all absent payloads
//! - [`any`]: the first present handle by index, collecting absent payloads otherwise
//!
//! The futures work on any `Unpin` future whose output implements [`Branch`],
//! which covers `OptionAsync`, `ResultAsync` and boxed futures of `Option` or
//! `Result`. Each poll drives every unresolved handle, so handles that were
//! started eagerly keep making progress while earlier indices are awaited;
//! the answer is always assembled in input order.
//!
//! Handles released after a short-circuit are dropped, not cancelled. A clone
//! held elsewhere still observes the resolution, and an `OptionAsync` or
//! `ResultAsync` with no other handle is finished by the background driver.
//! Plain futures passed to the free functions are ordinary futures and are
//! dropped with the aggregate.

pub mod all;
pub mod all_settled;
pub mod any;
pub mod branch;

pub use all::All;
pub use all_settled::AllSettled;
pub use any::Any;
pub use branch::Branch;

use std::future::Future;

/// Resolves to every present payload in input order, or to the first absent
/// payload by index.
///
/// An empty input resolves present with an empty `Vec`.
pub fn all<I>(handles: I) -> All<I::Item>
where
    I: IntoIterator,
    I::Item: Future + Unpin,
    <I::Item as Future>::Output: Branch,
{
    All::new(handles)
}

/// Waits for every handle; resolves to the present payloads if none was
/// absent, otherwise to every absent payload. Both lists keep input order.
pub fn all_settled<I>(handles: I) -> AllSettled<I::Item>
where
    I: IntoIterator,
    I::Item: Future + Unpin,
    <I::Item as Future>::Output: Branch,
{
    AllSettled::new(handles)
}

/// Resolves to the first present payload by index, or to every absent payload
/// in input order. An empty input resolves absent with an empty `Vec`.
pub fn any<I>(handles: I) -> Any<I::Item>
where
    I: IntoIterator,
    I::Item: Future + Unpin,
    <I::Item as Future>::Output: Branch,
{
    Any::new(handles)
}
