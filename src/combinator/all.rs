//! Short-circuiting conjunction over many handles.
//!
//! [`All`] drives every handle on each poll, so the handles race, but decides
//! strictly in input order: the aggregate fails with the absent payload at the
//! lowest index, even if a later handle failed first.

use super::Branch;
use crate::tracing_compat::debug;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

type Split<H> = Result<Present<H>, Absent<H>>;
type Present<H> = <<H as Future>::Output as Branch>::Present;
type Absent<H> = <<H as Future>::Output as Branch>::Absent;

/// A future resolving to every present payload in input order, or to the first
/// absent payload by index.
///
/// Created by [`all`](super::all), [`OptionAsync::all`](crate::OptionAsync::all)
/// and [`ResultAsync::all`](crate::ResultAsync::all).
#[must_use = "futures do nothing unless polled"]
pub struct All<H>
where
    H: Future,
    H::Output: Branch,
{
    handles: Vec<Option<H>>,
    results: Vec<Option<Split<H>>>,
    values: Vec<Present<H>>,
    front: usize,
}

// Handles are polled through `Pin::new` and payloads are never pinned, so the
// aggregate is `Unpin` whatever the payload types are.
impl<H> Unpin for All<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
}

impl<H> All<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    /// Creates a new `All` over `handles`.
    pub(crate) fn new(handles: impl IntoIterator<Item = H>) -> Self {
        let handles: Vec<Option<H>> = handles.into_iter().map(Some).collect();
        let len = handles.len();
        Self {
            handles,
            results: std::iter::repeat_with(|| None).take(len).collect(),
            values: Vec::with_capacity(len),
            front: 0,
        }
    }

    /// Number of handles not yet resolved.
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|handle| handle.is_some()).count()
    }
}

impl<H> Future for All<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    type Output = Result<Vec<Present<H>>, Absent<H>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let slots = this.handles.iter_mut().zip(this.results.iter_mut());
        for (handle, result) in slots.skip(this.front) {
            let Some(future) = handle.as_mut() else {
                continue;
            };
            let Poll::Ready(output) = Pin::new(future).poll(cx) else {
                continue;
            };
            *handle = None;
            *result = Some(output.branch());
        }

        while this.front < this.results.len() {
            match this.results[this.front].take() {
                None => return Poll::Pending,
                Some(Ok(value)) => {
                    this.values.push(value);
                    this.front += 1;
                }
                Some(Err(absent)) => {
                    debug!(
                        index = this.front,
                        released = this.pending(),
                        "all short-circuited"
                    );
                    this.handles.clear();
                    this.results.clear();
                    return Poll::Ready(Err(absent));
                }
            }
        }

        debug!(count = this.values.len(), "all resolved");
        Poll::Ready(Ok(mem::take(&mut this.values)))
    }
}
