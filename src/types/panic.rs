//! Captured panic payloads.
//!
//! A panic inside a producer or callback is a control-level failure. Where the
//! crate converts one into data (the `try_*` constructors) or needs to report
//! it to a later observer, it keeps a [`PanicPayload`]: the panic message,
//! detached from the original `Box<dyn Any + Send>` so it can be cloned and
//! compared.

use core::fmt;
use std::any::Any;

/// Placeholder message for panics whose payload is not a string.
const OPAQUE_PAYLOAD: &str = "non-string panic payload";

/// The message of a caught panic.
///
/// # Example
///
/// ```
/// use asum::types::PanicPayload;
///
/// let caught = std::panic::catch_unwind(|| -> u8 { panic!("boom") }).unwrap_err();
/// let payload = PanicPayload::from_panic(caught.as_ref());
/// assert_eq!(payload.message(), "boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanicPayload {
    message: String,
}

impl PanicPayload {
    /// Creates a payload carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a raw panic payload.
    ///
    /// `&'static str` and `String` payloads (everything `panic!` produces) are
    /// preserved verbatim; anything else is summarized.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.clone())
        } else {
            Self::new(OPAQUE_PAYLOAD)
        }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the payload, returning the message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
