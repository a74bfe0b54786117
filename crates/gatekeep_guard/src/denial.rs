//! Why a guarded action was refused, and the notice shown for it.

use gatekeep_core::PermissionSpec;
use gatekeep_security::{Shortfall, Subject};
use std::fmt;

/// Prompt sent to an anonymous admin.
pub const CHALLENGE_PROMPT: &str = "Please verify that you are an admin to perform this action.";

/// Label of the verify button.
pub const VERIFY_BUTTON: &str = "Verify Admin";

/// Alert for a verify press whose challenge is gone.
pub const CHALLENGE_EXPIRED: &str = "Verification expired or failed to get message.";

/// A refused invocation.
///
/// Displays as the short notice sent to the chat.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{PermissionSpec, Privilege};
/// use gatekeep_guard::Denial;
/// use gatekeep_security::Subject;
///
/// let denial = Denial::MissingPermissions {
///     subject: Subject::User,
///     missing: PermissionSpec::from(Privilege::PinMessages),
/// };
/// assert_eq!(
///     denial.to_string(),
///     "You lack the required permissions: pin messages (can_pin_messages)."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// Used in a private chat where the policy forbids it
    PrivateChat,
    /// Invoker is not on the developer allowlist
    DevelopersOnly,
    /// The membership record could not be found
    MemberUnavailable {
        /// Whose record was missing
        subject: Subject,
    },
    /// Invoker is not the chat owner
    OwnerOnly,
    /// Subject is neither administrator nor owner
    NotAdmin {
        /// Who fell short
        subject: Subject,
    },
    /// Subject is an administrator lacking some privileges
    MissingPermissions {
        /// Who fell short
        subject: Subject,
        /// Unsatisfied flags, in request order
        missing: PermissionSpec,
    },
}

impl Denial {
    /// Translate an evaluator shortfall for a subject.
    pub fn from_shortfall(subject: Subject, shortfall: Shortfall) -> Self {
        match shortfall {
            Shortfall::NotAdmin => Self::NotAdmin { subject },
            Shortfall::NotOwner => Self::OwnerOnly,
            Shortfall::MissingPermissions(missing) => Self::MissingPermissions { subject, missing },
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateChat => write!(f, "This command can only be used in groups."),
            Self::DevelopersOnly => write!(f, "Only developers can use this command."),
            Self::MemberUnavailable { .. } => write!(f, "Could not retrieve member information."),
            Self::OwnerOnly => write!(f, "Only the chat owner can use this command."),
            Self::NotAdmin { subject } => write!(f, "{} need to be an admin to do this.", subject),
            Self::MissingPermissions { subject, missing } => {
                let listed = missing
                    .iter()
                    .map(|flag| format!("{} ({})", flag.phrase(), flag))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{} lack the required permissions: {}.", subject, listed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_core::Privilege;

    #[test]
    fn test_subject_wording() {
        assert_eq!(
            Denial::NotAdmin {
                subject: Subject::Bot
            }
            .to_string(),
            "I need to be an admin to do this."
        );
        assert_eq!(
            Denial::NotAdmin {
                subject: Subject::User
            }
            .to_string(),
            "You need to be an admin to do this."
        );
    }

    #[test]
    fn test_missing_permissions_listed_in_order() {
        let denial = Denial::MissingPermissions {
            subject: Subject::Bot,
            missing: PermissionSpec::from([Privilege::RestrictMembers, Privilege::DeleteMessages]),
        };
        let text = denial.to_string();
        assert!(text.starts_with("I lack"));
        let restrict = text.find("can_restrict_members").unwrap();
        let delete = text.find("can_delete_messages").unwrap();
        assert!(restrict < delete);
    }

    #[test]
    fn test_from_shortfall() {
        assert_eq!(
            Denial::from_shortfall(Subject::User, Shortfall::NotOwner),
            Denial::OwnerOnly
        );
        assert_eq!(
            Denial::from_shortfall(Subject::Bot, Shortfall::NotAdmin),
            Denial::NotAdmin {
                subject: Subject::Bot
            }
        );
    }
}
