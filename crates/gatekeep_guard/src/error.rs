//! Errors surfaced by guards and the challenge resolver.

use gatekeep_error::TransportError;
use gatekeep_interface::ActionError;

/// Failure of a guarded run or a challenge resolution.
///
/// Denials are not errors: they are reported through the outcome. What
/// remains is either the bot API failing or the protected action itself
/// failing, and the latter is carried exactly as the action raised it.
#[derive(Debug, derive_more::Display)]
pub enum GuardError {
    /// Bot API failure while looking up members or sending output
    #[display("{}", _0)]
    Transport(TransportError),
    /// Error raised by the protected action
    #[display("{}", _0)]
    Action(ActionError),
}

impl GuardError {
    /// Recover the action's own error, if that is what failed.
    pub fn into_action_error(self) -> Option<ActionError> {
        match self {
            Self::Action(err) => Some(err),
            Self::Transport(_) => None,
        }
    }

    /// Flatten into an action error, unwrapping the action's own error
    /// rather than boxing it a second time.
    pub fn into_boxed(self) -> ActionError {
        match self {
            Self::Action(err) => err,
            Self::Transport(err) => Box::new(err),
        }
    }

    /// Whether the protected action failed.
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action(_))
    }
}

impl std::error::Error for GuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Action(err) => Some(err.as_ref()),
        }
    }
}

impl From<TransportError> for GuardError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;
