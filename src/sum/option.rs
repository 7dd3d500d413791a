//! `Option` extensions.

use super::sealed::Sealed;

/// Extra combinators for [`Option`].
pub trait OptionExt<T>: Sealed {
    /// Combines two present values with `f`; `None` if either is absent.
    ///
    /// `f` is not called unless both are present.
    fn zip_map<U, R, F>(self, other: Option<U>, f: F) -> Option<R>
    where
        F: FnOnce(T, U) -> R;

    /// Swaps in `value` and returns the previous one.
    ///
    /// Unlike [`Option::replace`], an empty option is left empty and the
    /// supplied value comes straight back as `Some(value)`: there is no old
    /// value to hand out, and `None` stays the no-op variant.
    ///
    /// ```
    /// use asum::OptionExt;
    ///
    /// let mut slot = Some(1);
    /// assert_eq!(slot.replace_value(2), Some(1));
    /// assert_eq!(slot, Some(2));
    ///
    /// let mut empty = None;
    /// assert_eq!(empty.replace_value(3), Some(3));
    /// assert_eq!(empty, None);
    /// ```
    fn replace_value(&mut self, value: T) -> Option<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn zip_map<U, R, F>(self, other: Option<U>, f: F) -> Option<R>
    where
        F: FnOnce(T, U) -> R,
    {
        Some(f(self?, other?))
    }

    fn replace_value(&mut self, value: T) -> Option<T> {
        match self {
            Some(held) => Some(std::mem::replace(held, value)),
            None => Some(value),
        }
    }
}

/// Runs `f`, returning `Some` of its value, or `None` if it panicked.
///
/// ```
/// let value = asum::sum::option::catch(|| 2 + 2);
/// assert_eq!(value, Some(4));
///
/// let value = asum::sum::option::catch(|| -> u8 { panic!("boom") });
/// assert_eq!(value, None);
/// ```
pub fn catch<T, F>(f: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    super::result::catch(f).ok()
}
