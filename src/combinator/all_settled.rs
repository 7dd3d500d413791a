//! Error-collecting aggregation over many handles.

use super::Branch;
use crate::tracing_compat::debug;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type Split<H> = Result<Present<H>, Absent<H>>;
type Present<H> = <<H as Future>::Output as Branch>::Present;
type Absent<H> = <<H as Future>::Output as Branch>::Absent;

/// A future that waits for every handle, then resolves to all present
/// payloads, or to every absent payload if at least one handle was absent.
///
/// Both lists keep input order. Unlike [`All`](super::All) this never
/// short-circuits.
#[must_use = "futures do nothing unless polled"]
pub struct AllSettled<H>
where
    H: Future,
    H::Output: Branch,
{
    handles: Vec<Option<H>>,
    results: Vec<Option<Split<H>>>,
    remaining: usize,
}

impl<H> Unpin for AllSettled<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
}

impl<H> AllSettled<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    pub(crate) fn new(handles: impl IntoIterator<Item = H>) -> Self {
        let handles: Vec<Option<H>> = handles.into_iter().map(Some).collect();
        let remaining = handles.len();
        Self {
            handles,
            results: std::iter::repeat_with(|| None).take(remaining).collect(),
            remaining,
        }
    }

    /// Number of handles not yet resolved.
    pub fn pending(&self) -> usize {
        self.remaining
    }
}

impl<H> Future for AllSettled<H>
where
    H: Future + Unpin,
    H::Output: Branch,
{
    type Output = Result<Vec<Present<H>>, Vec<Absent<H>>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        for (handle, result) in this.handles.iter_mut().zip(this.results.iter_mut()) {
            let Some(future) = handle.as_mut() else {
                continue;
            };
            let Poll::Ready(output) = Pin::new(future).poll(cx) else {
                continue;
            };
            *handle = None;
            *result = Some(output.branch());
            this.remaining -= 1;
        }

        if this.remaining > 0 {
            return Poll::Pending;
        }

        let mut values = Vec::with_capacity(this.results.len());
        let mut failures = Vec::new();
        for result in this.results.drain(..).flatten() {
            match result {
                Ok(value) => values.push(value),
                Err(absent) => failures.push(absent),
            }
        }
        debug!(
            present = values.len(),
            absent = failures.len(),
            "all_settled resolved"
        );

        if failures.is_empty() {
            Poll::Ready(Ok(values))
        } else {
            Poll::Ready(Err(failures))
        }
    }
}
