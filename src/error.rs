//! Error types.
//!
//! Data-level absence (`None`, `Err(e)`) never goes through this module: it is
//! ordinary data carried by the wrappers. [`Error`] only describes control-level
//! failures, either converted to data by a `try_*` constructor
//! ([`Error::Panicked`]) or reported to an observer that reached a computation
//! whose panic was already re-raised elsewhere ([`Error::Poisoned`]).

use crate::types::PanicPayload;
use thiserror::Error;

/// Crate error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The producer of a `try_*` constructor panicked.
    #[error("pending computation panicked: {0}")]
    Panicked(PanicPayload),
    /// The pending computation panicked and the panic was already re-raised
    /// at another observer.
    #[error("pending computation was poisoned by an earlier panic: {0}")]
    Poisoned(PanicPayload),
}

impl Error {
    /// Returns the captured panic payload.
    #[must_use]
    pub const fn payload(&self) -> &PanicPayload {
        match self {
            Self::Panicked(payload) | Self::Poisoned(payload) => payload,
        }
    }

    /// Returns `true` if this error came from a `try_*` constructor.
    #[must_use]
    pub const fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }
}

impl From<PanicPayload> for Error {
    fn from(payload: PanicPayload) -> Self {
        Self::Panicked(payload)
    }
}

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = Error::Panicked(PanicPayload::new("boom"));
        assert!(err.to_string().contains("panicked"));
        assert!(err.to_string().contains("boom"));

        let err = Error::Poisoned(PanicPayload::new("boom"));
        assert!(err.to_string().contains("poisoned"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn payload_accessor() {
        let err: Error = PanicPayload::new("inner").into();
        assert!(err.is_panicked());
        assert_eq!(err.payload().message(), "inner");
        assert!(!Error::Poisoned(PanicPayload::new("x")).is_panicked());
    }
}
