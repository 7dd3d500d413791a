//! Optional tracing integration.
//!
//! With the `tracing-integration` feature the logging macros below are the
//! `tracing` crate's own. Without it they expand to nothing, so instrumented
//! paths cost nothing and the crate carries no `tracing` dependency.
//!
//! ```ignore
//! use crate::tracing_compat::{debug, trace, warn};
//!
//! trace!(state = "eager", "pending computation created");
//! ```

#[cfg(feature = "tracing-integration")]
pub(crate) use tracing::{debug, trace, warn};

// The no-op macros carry a suffix: a `macro_rules! warn` re-exported as-is
// is ambiguous with the built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! trace_noop {
        ($($arg:tt)*) => {};
    }

    macro_rules! debug_noop {
        ($($arg:tt)*) => {};
    }

    macro_rules! warn_noop {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug_noop as debug, trace_noop as trace, warn_noop as warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use noop::{debug, trace, warn};
