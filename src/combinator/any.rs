//! First-present disjunction over many handles.

use super::Branch;
use crate::tracing_compat::debug;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

type Split<H> = Result<Present<H>, Absent<H>>;
type Present<H> = <<H as Future>::Output as Branch>::Present;
type Absent<H> = <<H as Future>::Output as Branch>::Absent;

/// A future resolving to the first present payload by input index, or to every
/// absent payload in input order when none was present.
///
/// The dual of [`All`](super::All): a present result at the scan front wins
/// immediately and the remaining handles are released.
#[must_use = "futures do nothing unless polled"]
pub struct Any<H>
where
    H: Future,
    H::Output: Branch,
{
    handles: Vec<Option<H>>,
    results: Vec<Option<Split<H>>>,
    failures: Vec<Absent<H>>,
    front: usize,
}

impl<H> Unpin for Any<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
}

impl<H> Any<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    pub(crate) fn new(handles: impl IntoIterator<Item = H>) -> Self {
        let handles: Vec<Option<H>> = handles.into_iter().map(Some).collect();
        let len = handles.len();
        Self {
            handles,
            results: std::iter::repeat_with(|| None).take(len).collect(),
            failures: Vec::with_capacity(len),
            front: 0,
        }
    }
}

impl<H> Future for Any<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    type Output = Result<Present<H>, Vec<Absent<H>>>;

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
                Some(Err(absent)) => {
                    this.failures.push(absent);
                    this.front += 1;
                }
                Some(Ok(value)) => {
                    debug!(index = this.front, "any found present value");
                    this.handles.clear();
                    this.results.clear();
                    return Poll::Ready(Ok(value));
                }
            }
        }

        debug!(absent = this.failures.len(), "any exhausted");
        Poll::Ready(Err(mem::take(&mut this.failures)))
    }
}
