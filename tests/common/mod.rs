//! Shared helpers for integration tests.

#![allow(dead_code, unused_imports, unused_macros)]

pub use asum::test_utils::init_test_logging;
pub use asum::{assert_with_log, test_complete, test_phase};

use futures_lite::future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Logs a named section inside a test.
macro_rules! test_section {
    ($name:expr) => {
        ::tracing::info!(section = %$name, "test section");
    };
}

/// Yields to the driver `times` times.
pub async fn yield_times(times: usize) {
    for _ in 0..times {
        future::yield_now().await;
    }
}

/// Resolves to `value` after `times` yields.
pub async fn after<T>(times: usize, value: T) -> T {
    yield_times(times).await;
    value
}

/// Polls `done` until it holds or five seconds pass. Used for work finished by
/// the background driver.
pub fn eventually(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    done()
}

/// Shared call counter for side-effect assertions.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
