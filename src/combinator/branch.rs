//! Present/absent split shared by the aggregation combinators.

/// A two-variant sum type viewed as "present" or "absent".
///
/// The aggregation futures work on any handle whose output implements
/// `Branch`, so `Option` and `Result` share one implementation of `all`,
/// `all_settled` and `any`.
pub trait Branch {
    /// Payload of the present variant.
    type Present;
    /// Payload of the absent variant (`()` for `None`).
    type Absent;

    /// Splits `self` into its present or absent payload.
    fn branch(self) -> Result<Self::Present, Self::Absent>;
}

impl<T> Branch for Option<T> {
    type Present = T;
    type Absent = ();

    fn branch(self) -> Result<T, ()> {
        self.ok_or(())
    }
}

impl<T, E> Branch for Result<T, E> {
    type Present = T;
    type Absent = E;

    fn branch(self) -> Self {
        self
    }
}
