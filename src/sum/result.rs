//! `Result` extensions.

use super::sealed::{Sealed, SealedFailure, SealedSuccess};
use crate::tracing_compat::warn;
use crate::types::PanicPayload;
use std::convert::Infallible;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Extra combinators for nested [`Result`]s sharing one error type.
pub trait ResultExt<T, E>: Sealed {
    /// Removes one level of nesting.
    ///
    /// ```
    /// use asum::sum::ResultExt;
    ///
    /// let nested: Result<Result<u8, &str>, &str> = Ok(Err("inner"));
    /// assert_eq!(nested.flatten_result(), Err("inner"));
    /// ```
    fn flatten_result(self) -> Result<T, E>;
}

impl<T, E> ResultExt<T, E> for Result<Result<T, E>, E> {
    fn flatten_result(self) -> Result<T, E> {
        self.and_then(|inner| inner)
    }
}

/// A `Result` that cannot be `Err`.
pub trait SuccessExt<T>: SealedSuccess {
    /// Returns the success value. Cannot panic.
    fn into_success(self) -> T;

    /// Re-types the uninhabited error channel.
    fn widen_err<E>(self) -> Result<T, E>;
}

impl<T> SuccessExt<T> for Result<T, Infallible> {
    fn into_success(self) -> T {
        match self {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    fn widen_err<E>(self) -> Result<T, E> {
        Ok(self.into_success())
    }
}

/// A `Result` that cannot be `Ok`.
pub trait FailureExt<E>: SealedFailure {
    /// Returns the error value. Cannot panic.
    fn into_failure(self) -> E;

    /// Re-types the uninhabited success channel.
    fn widen_ok<T>(self) -> Result<T, E>;
}

impl<E> FailureExt<E> for Result<Infallible, E> {
    fn into_failure(self) -> E {
        match self {
            Ok(never) => match never {},
            Err(error) => error,
        }
    }

    fn widen_ok<T>(self) -> Result<T, E> {
        Err(self.into_failure())
    }
}

/// Runs `f`, returning `Ok` of its value, or `Err` with the panic payload.
pub fn catch<T, F>(f: F) -> Result<T, PanicPayload>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(|raw| {
        let payload = PanicPayload::from_panic(raw.as_ref());
        warn!(panic = %payload, "panic caught as Err");
        payload
    })
}

/// Like [`catch`], with the payload mapped into the caller's error type.
///
/// ```
/// use asum::sum::result::catch_with;
///
/// let parsed: Result<u8, String> = catch_with(|| panic!("bad input"), |p| p.into_message());
/// assert_eq!(parsed, Err("bad input".to_string()));
/// ```
pub fn catch_with<T, E, F, M>(f: F, map: M) -> Result<T, E>
where
    F: FnOnce() -> T,
    M: FnOnce(PanicPayload) -> E,
{
    catch(f).map_err(map)
}
