//! Unwind-catching future adapter.
//!
//! [`CatchPanic`] turns a panic raised while polling its inner future into a
//! ready `Err(PanicPayload)`. It is the mechanism behind the `try_*`
//! constructors: the one place a control-level failure becomes data.

use crate::tracing_compat::warn;
use crate::types::PanicPayload;
use pin_project::pin_project;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A future that resolves to `Err(PanicPayload)` if its inner future panics.
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct CatchPanic<F> {
    #[pin]
    future: F,
}

impl<F> CatchPanic<F> {
    /// Wraps `future`.
    pub fn new(future: F) -> Self {
        Self { future }
    }
}

impl<F: Future> Future for CatchPanic<F> {
    type Output = Result<F::Output, PanicPayload>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let future = self.project().future;
        match catch_unwind(AssertUnwindSafe(|| future.poll(cx))) {
            Ok(Poll::Ready(value)) => Poll::Ready(Ok(value)),
            Ok(Poll::Pending) => Poll::Pending,
            Err(raw) => {
                let payload = PanicPayload::from_panic(raw.as_ref());
                warn!(panic = %payload, "producer panic converted to data");
                Poll::Ready(Err(payload))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::task::{Wake, Waker};

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn noop_waker() -> Waker {
        Waker::from(Arc::new(NoopWaker))
    }

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn passes_value_through() {
        init_test("passes_value_through");
        let mut future = Box::pin(CatchPanic::new(async { 5 }));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = future.as_mut().poll(&mut cx);
        let ok = matches!(poll, Poll::Ready(Ok(5)));
        crate::assert_with_log!(ok, "value", "Poll::Ready(Ok(5))", poll);
        crate::test_complete!("passes_value_through");
    }

    #[test]
    fn converts_panic_to_payload() {
        init_test("converts_panic_to_payload");
        let mut future = Box::pin(CatchPanic::new(async {
            if true {
                panic!("producer failed");
            }
            5
        }));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        match future.as_mut().poll(&mut cx) {
            Poll::Ready(Err(payload)) => {
                let ok = payload.message() == "producer failed";
                crate::assert_with_log!(ok, "payload", "producer failed", payload.message());
            }
            other => panic!("expected caught panic, got {other:?}"),
        }
        crate::test_complete!("converts_panic_to_payload");
    }
}
