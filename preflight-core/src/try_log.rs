use std::fmt;

/// Unwraps an `Option` or `Result`, logging a warning and running the fallback on failure.
///
/// ```ignore
/// let flag = try_log!(name.parse::<AdvisoryFlag>(), expect "unknown advisory flag {name:?}" or continue);
/// ```
#[macro_export]
macro_rules! try_log {
    (
        $expr:expr,
        expect $must:literal $(
            (
                $($must_args:expr),* $(,)?
            )
        )?
        or $never:expr
    ) => {
        {
            if let Some(value) = $crate::TryLog::convert_or_log(
                $expr,
                format_args!($must, $($($must_args),*)?),
            ) {
                value
            } else {
                $never
            }
        }
    }
}

pub use try_log;

pub trait TryLog<T> {
    /// Returns the successful result as `Some`, or logs the failure with `must`.
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T>;
}

impl<T> TryLog<T> for Option<T> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        if let Some(value) = this {
            Some(value)
        } else {
            tracing::warn!("{must}");
            None
        }
    }
}

impl<T, E: fmt::Display> TryLog<T> for Result<T, E> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        match this {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("{must}: {err}");
                None
            }
        }
    }
}
