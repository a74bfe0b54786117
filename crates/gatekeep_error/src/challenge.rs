//! Anonymous-admin challenge errors.

/// Specific challenge error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChallengeErrorKind {
    /// Callback payload does not carry a challenge token.
    #[display("Malformed challenge payload: {}", _0)]
    MalformedPayload(String),
}

/// Challenge error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Challenge Error: {} at line {} in {}", kind, line, file)]
pub struct ChallengeError {
    /// The specific error kind
    pub kind: ChallengeErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ChallengeError {
    /// Create a new challenge error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ChallengeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChallengeErrorKind {
        &self.kind
    }
}
