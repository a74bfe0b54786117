//! Bot API transport error types.

/// Failure reported by the external bot API.
///
/// Transport errors are surfaced exactly once to the caller. Nothing in this
/// workspace retries them.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", message, line, file)]
pub struct TransportError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatekeep_error::TransportError;
    ///
    /// let err = TransportError::new("502 Bad Gateway");
    /// assert!(err.message.contains("Bad Gateway"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
