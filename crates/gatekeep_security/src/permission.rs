//! Role and privilege evaluation.

use gatekeep_core::{MemberStatus, MembershipRecord, PermissionSpec};
use tracing::{debug, instrument};

/// Whose membership is being evaluated.
///
/// Displays as the grammatical subject used in notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Subject {
    /// The bot itself
    #[display("I")]
    Bot,
    /// The invoking user
    #[display("You")]
    User,
}

/// Why an evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortfall {
    /// Neither administrator nor owner
    NotAdmin,
    /// Owner role required but not held
    NotOwner,
    /// Administrator lacking some requested privileges, in request order
    MissingPermissions(PermissionSpec),
}

/// What a protected action demands of the bot and the invoking user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Privileges required of each checked subject
    pub permissions: PermissionSpec,
    /// Check the bot's role and privileges
    pub check_bot: bool,
    /// Check the user's role and privileges
    pub check_user: bool,
    /// Only the chat owner may invoke
    pub owner_only: bool,
}

impl Requirements {
    /// Whether the bot's record must be fetched.
    pub fn needs_bot_record(&self) -> bool {
        self.check_bot
    }

    /// Whether the user's record must be fetched.
    pub fn needs_user_record(&self) -> bool {
        self.check_user || self.owner_only
    }
}

/// Pure decision logic over membership records.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{ChatId, MemberStatus, MembershipRecord, PermissionSpec, Privilege, UserId};
/// use gatekeep_security::PermissionEvaluator;
///
/// let admin = MembershipRecord::new(ChatId(-1), UserId(5), MemberStatus::Administrator)
///     .with_privileges([Privilege::DeleteMessages]);
/// let spec = PermissionSpec::from([Privilege::DeleteMessages, Privilege::PinMessages]);
///
/// let (granted, missing) = PermissionEvaluator::has_permissions(&admin, &spec);
/// assert!(!granted);
/// assert_eq!(missing, PermissionSpec::from(Privilege::PinMessages));
/// ```
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    /// Administrator or owner.
    pub fn is_admin(record: &MembershipRecord) -> bool {
        matches!(
            record.status(),
            MemberStatus::Administrator | MemberStatus::Owner
        )
    }

    /// Owner.
    pub fn is_owner(record: &MembershipRecord) -> bool {
        *record.status() == MemberStatus::Owner
    }

    /// Check a permission spec against a record.
    ///
    /// - Empty spec: granted.
    /// - Owner: granted regardless of flags.
    /// - Administrator: granted iff every flag is set; missing flags are
    ///   listed in spec order.
    /// - Anyone else: denied with the whole spec missing.
    pub fn has_permissions(
        record: &MembershipRecord,
        spec: &PermissionSpec,
    ) -> (bool, PermissionSpec) {
        if spec.is_empty() {
            return (true, PermissionSpec::none());
        }
        match record.status() {
            MemberStatus::Owner => (true, PermissionSpec::none()),
            MemberStatus::Administrator => {
                let missing = Self::missing_flags(record, spec);
                (missing.is_empty(), missing)
            }
            _ => (false, spec.clone()),
        }
    }

    /// Flags in `spec` not set on the record, ignoring the record's role.
    pub fn missing_flags(record: &MembershipRecord, spec: &PermissionSpec) -> PermissionSpec {
        spec.iter().filter(|flag| !record.grants(*flag)).collect()
    }

    /// Role check followed by privilege check for one subject.
    ///
    /// Owner status exempts the user from privilege checks. The bot is never
    /// exempt: its flags are checked whatever its role.
    #[instrument(skip(record, spec), fields(status = %record.status(), required = spec.len()))]
    pub fn evaluate(
        subject: Subject,
        record: &MembershipRecord,
        spec: &PermissionSpec,
    ) -> Result<(), Shortfall> {
        if !Self::is_admin(record) {
            debug!("Subject is not an admin");
            return Err(Shortfall::NotAdmin);
        }

        let missing = match subject {
            Subject::User => Self::has_permissions(record, spec).1,
            Subject::Bot => Self::missing_flags(record, spec),
        };

        if missing.is_empty() {
            Ok(())
        } else {
            debug!(missing = %missing.names(), "Subject lacks permissions");
            Err(Shortfall::MissingPermissions(missing))
        }
    }

    /// Owner-only check.
    pub fn check_owner(record: &MembershipRecord) -> Result<(), Shortfall> {
        if Self::is_owner(record) {
            Ok(())
        } else {
            Err(Shortfall::NotOwner)
        }
    }
}
