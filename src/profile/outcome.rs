//! Uniform result of a profile lifecycle operation.

pub const CREATED: &str = "Account profile created.";
pub const ALREADY_EXISTS: &str = "Account profile already exists.";
pub const RETRIEVED: &str = "Account profile retrieved.";
pub const NOT_FOUND: &str = "Account profile not found.";
pub const UPDATED: &str = "Account profile information updated.";
pub const DELETED: &str = "Account profile deleted.";

/// Expected business outcome.
///
/// Failures such as "not found" travel as values; only storage failures
/// use the `Err` side of [`crate::error::Result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub succeeded: bool,
    pub result: Option<T>,
    pub message: String,
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `result`.
    pub fn success(result: T, message: &str) -> Self {
        Self {
            succeeded: true,
            result: Some(result),
            message: message.to_owned(),
        }
    }

    /// Failed outcome without payload.
    pub fn failure(message: &str) -> Self {
        Self {
            succeeded: false,
            result: None,
            message: message.to_owned(),
        }
    }

    /// Keep status and message, drop the payload.
    pub fn discard<U>(self) -> Outcome<U> {
        Outcome {
            succeeded: self.succeeded,
            result: None,
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_keeps_message() {
        let outcome = Outcome::<String>::failure(NOT_FOUND).discard::<()>();
        assert!(!outcome.succeeded);
        assert!(outcome.result.is_none());
        assert_eq!(outcome.message, NOT_FOUND);
    }

    #[test]
    fn test_success_carries_result() {
        let outcome = Outcome::success(7, RETRIEVED);
        assert!(outcome.succeeded);
        assert_eq!(outcome.result, Some(7));
        assert_eq!(outcome.message, "Account profile retrieved.");
    }
}
