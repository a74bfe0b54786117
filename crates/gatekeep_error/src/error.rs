//! Top-level error wrapper types.

use crate::{ChallengeError, ConfigError, MemberError, TransportError};

/// Foundation error enum covering every crate in the workspace.
///
/// # Examples
///
/// ```
/// use gatekeep_error::{GatekeepError, TransportError};
///
/// let err: GatekeepError = TransportError::new("timed out").into();
/// assert!(format!("{}", err).contains("Transport Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GatekeepErrorKind {
    /// Bot API transport error
    #[from(TransportError)]
    Transport(TransportError),
    /// Membership lookup error
    #[from(MemberError)]
    Member(MemberError),
    /// Challenge payload error
    #[from(ChallengeError)]
    Challenge(ChallengeError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Gatekeep error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Gatekeep Error: {}", _0)]
pub struct GatekeepError(Box<GatekeepErrorKind>);

impl GatekeepError {
    /// Create a new error from a kind.
    pub fn new(kind: GatekeepErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GatekeepErrorKind {
        &self.0
    }
}

impl<T> From<T> for GatekeepError
where
    T: Into<GatekeepErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for gatekeep operations.
pub type GatekeepResult<T> = std::result::Result<T, GatekeepError>;
