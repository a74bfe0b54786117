//! Membership lookup errors.

use crate::TransportError;

/// Ways a membership fetch can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MemberErrorKind {
    /// The API answered bad request or forbidden: no such member is visible.
    #[display("Member not found in chat {} (user {})", chat_id, user_id)]
    NotFound {
        /// Chat that was queried
        chat_id: i64,
        /// User that was queried
        user_id: i64,
    },
    /// Any other API failure.
    #[display("Membership lookup failed: {}", _0)]
    Transport(String),
}

/// Membership lookup error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Member Error: {} at line {} in {}", kind, line, file)]
pub struct MemberError {
    /// The specific error kind
    pub kind: MemberErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl MemberError {
    /// Create a new member error with caller location tracking.
    #[track_caller]
    pub fn new(kind: MemberErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a not-found failure.
    #[track_caller]
    pub fn not_found(chat_id: i64, user_id: i64) -> Self {
        Self::new(MemberErrorKind::NotFound { chat_id, user_id })
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(MemberErrorKind::Transport(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MemberErrorKind {
        &self.kind
    }

    /// Whether the member simply does not exist (as opposed to a failed call).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, MemberErrorKind::NotFound { .. })
    }

    /// Convert a non-not-found failure into a transport error.
    ///
    /// Not-found failures are converted too, keeping their message, but callers
    /// are expected to branch on [`MemberError::is_not_found`] first.
    pub fn into_transport(self) -> TransportError {
        TransportError {
            message: self.kind.to_string(),
            line: self.line,
            file: self.file,
        }
    }
}

impl From<TransportError> for MemberError {
    fn from(err: TransportError) -> Self {
        Self {
            kind: MemberErrorKind::Transport(err.message),
            line: err.line,
            file: err.file,
        }
    }
}
