//! Errors from loading gatekeep settings.

/// A settings source could not be read or did not match the expected shape.
///
/// Raised while layering the bundled defaults, user files and `GATEKEEP_`
/// variables. The location is where the loader gave up, not where the bad
/// value lives; `message` names the source.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What failed, including the offending source
    pub message: String,
    /// Loader line
    pub line: u32,
    /// Loader file
    pub file: &'static str,
}

impl ConfigError {
    /// Record a loader failure at the caller's location.
    ///
    /// ```
    /// use gatekeep_error::ConfigError;
    ///
    /// let err = ConfigError::new("challenges.ttl_secs: invalid type: string \"soon\"");
    /// assert!(err.to_string().starts_with("Configuration Error: challenges.ttl_secs"));
    /// assert!(err.file.ends_with(".rs"));
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
