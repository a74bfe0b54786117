//! Membership snapshots.

use crate::{ChatId, Privilege, PrivilegeSet, UserId};
use derive_getters::Getters;

/// Role of a user within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MemberStatus {
    /// Ordinary member
    Member,
    /// Administrator with a subset of privileges
    Administrator,
    /// Chat creator
    Owner,
    /// Member under restrictions
    Restricted,
    /// Former member
    Left,
    /// Banned user
    Banned,
}

/// Role and privilege snapshot for one user in one chat, as of last fetch.
///
/// Records are immutable: a fresh fetch supersedes a record rather than
/// updating it.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{ChatId, MemberStatus, MembershipRecord, Privilege, UserId};
///
/// let record = MembershipRecord::new(ChatId(-100), UserId(42), MemberStatus::Administrator)
///     .with_privileges([Privilege::PinMessages]);
///
/// assert_eq!(*record.status(), MemberStatus::Administrator);
/// assert!(record.grants(Privilege::PinMessages));
/// assert!(!record.grants(Privilege::DeleteMessages));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MembershipRecord {
    chat_id: ChatId,
    user_id: UserId,
    status: MemberStatus,
    privileges: PrivilegeSet,
}

impl MembershipRecord {
    /// Create a record with no privilege flags.
    pub fn new(chat_id: ChatId, user_id: UserId, status: MemberStatus) -> Self {
        Self {
            chat_id,
            user_id,
            status,
            privileges: PrivilegeSet::new(),
        }
    }

    /// Replace the granted flags.
    ///
    /// Flags only mean something for administrators and owners; they are kept
    /// verbatim for other statuses but never consulted.
    pub fn with_privileges(mut self, privileges: impl IntoIterator<Item = Privilege>) -> Self {
        self.privileges = privileges.into_iter().collect();
        self
    }

    /// Whether the record carries a flag.
    pub fn grants(&self, privilege: Privilege) -> bool {
        self.privileges.contains(privilege)
    }
}
