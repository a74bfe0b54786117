//! Guard policies and the developer allowlist.

use derive_getters::Getters;
use gatekeep_core::{PermissionSpec, UserId};
use gatekeep_security::Requirements;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a guarded action demands before it may run.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{PermissionSpec, Privilege};
/// use gatekeep_guard::GuardPolicyBuilder;
///
/// let policy = GuardPolicyBuilder::default()
///     .permissions(PermissionSpec::from(Privilege::RestrictMembers))
///     .require_both(true)
///     .build()
///     .unwrap();
///
/// let requirements = policy.requirements();
/// assert!(requirements.check_bot && requirements.check_user);
/// assert!(*policy.allow_private_chat());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(setter(into))]
pub struct GuardPolicy {
    /// Privileges each checked subject must hold
    #[builder(default)]
    permissions: PermissionSpec,
    /// Check the bot's role and privileges
    #[builder(default)]
    require_bot: bool,
    /// Check the invoking user's role and privileges
    #[builder(default)]
    require_user: bool,
    /// Check both, bot first
    #[builder(default)]
    require_both: bool,
    /// Only the chat owner may invoke
    #[builder(default)]
    owner_only: bool,
    /// Only configured developers may invoke
    #[builder(default)]
    dev_only: bool,
    /// Fail without sending a notice
    #[builder(default)]
    silent_on_failure: bool,
    /// Run unchecked in private chats instead of refusing
    #[builder(default = "true")]
    allow_private_chat: bool,
}

impl GuardPolicy {
    /// The membership checks this policy implies.
    pub fn requirements(&self) -> Requirements {
        Requirements {
            permissions: self.permissions.clone(),
            check_bot: self.require_bot || self.require_both,
            check_user: self.require_user || self.require_both,
            owner_only: self.owner_only,
        }
    }
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            permissions: PermissionSpec::none(),
            require_bot: false,
            require_user: false,
            require_both: false,
            owner_only: false,
            dev_only: false,
            silent_on_failure: false,
            allow_private_chat: true,
        }
    }
}

/// User ids with elevated trust, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeveloperSet(HashSet<UserId>);

impl DeveloperSet {
    /// An empty allowlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a user is a developer.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.0.contains(&user_id)
    }

    /// Number of developers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is a developer.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<UserId> for DeveloperSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
