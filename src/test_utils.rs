//! Test helpers: logging initialization and logged assertions.
//!
//! Available to unit tests and, with the `test-internals` feature, to
//! integration tests. Output goes through `tracing-subscriber`'s test writer
//! and honours `RUST_LOG` (default `asum=trace`).

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the test subscriber once per process.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("asum=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Marks the start of a named test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        ::tracing::info!(phase = %$name, "test phase start");
    };
}

/// Marks the successful end of a named test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        ::tracing::info!(test = %$name, "test complete");
    };
}

/// Asserts `cond`, logging the expectation first so failures carry context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        let passed: bool = $cond;
        ::tracing::debug!(
            check = %$msg,
            expected = ?$expected,
            actual = ?$actual,
            passed,
            "assertion"
        );
        assert!(
            passed,
            "{}: expected {:?}, got {:?}",
            $msg, $expected, $actual
        );
    }};
}
