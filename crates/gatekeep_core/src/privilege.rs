//! Administrator privilege flags and permission requirements.

use std::collections::BTreeSet;
use std::str::FromStr;

/// A single privilege an administrator may be granted.
///
/// Flags are identified by the bot API field name (`can_pin_messages`, ...),
/// which is also what [`Privilege::from_str`] accepts.
///
/// # Examples
///
/// ```
/// use gatekeep_core::Privilege;
/// use std::str::FromStr;
///
/// let flag = Privilege::from_str("can_pin_messages").unwrap();
/// assert_eq!(flag, Privilege::PinMessages);
/// assert_eq!(flag.to_string(), "can_pin_messages");
/// assert_eq!(flag.phrase(), "pin messages");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum Privilege {
    /// Delete messages of other users
    #[strum(serialize = "can_delete_messages")]
    DeleteMessages,
    /// Change chat title, photo and other settings
    #[strum(serialize = "can_change_info")]
    ChangeInfo,
    /// Add new administrators
    #[strum(serialize = "can_promote_members")]
    PromoteMembers,
    /// Pin messages
    #[strum(serialize = "can_pin_messages")]
    PinMessages,
    /// Invite new users
    #[strum(serialize = "can_invite_users")]
    InviteUsers,
    /// Restrict, ban or unban members
    #[strum(serialize = "can_restrict_members")]
    RestrictMembers,
    /// Access the event log and other admin-only views
    #[strum(serialize = "can_manage_chat")]
    ManageChat,
    /// Post in a channel
    #[strum(serialize = "can_post_messages")]
    PostMessages,
    /// Edit messages of other users in a channel
    #[strum(serialize = "can_edit_messages")]
    EditMessages,
    /// Manage video chats
    #[strum(serialize = "can_manage_video_chats")]
    ManageVideoChats,
    /// Send text messages
    #[strum(serialize = "can_send_messages")]
    SendMessages,
    /// Send media messages
    #[strum(serialize = "can_send_media_messages")]
    SendMedia,
    /// Send stickers, games and inline results
    #[strum(serialize = "can_send_other_messages")]
    SendOther,
    /// Send polls
    #[strum(serialize = "can_send_polls")]
    SendPolls,
    /// Attach link previews
    #[strum(serialize = "can_add_web_page_previews")]
    AddWebPreviews,
    /// Manage forum topics
    #[strum(serialize = "can_manage_topics")]
    ManageTopics,
}

impl Privilege {
    /// Human-readable phrase used in user-facing notices.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::DeleteMessages => "delete messages",
            Self::ChangeInfo => "change chat info",
            Self::PromoteMembers => "promote members",
            Self::PinMessages => "pin messages",
            Self::InviteUsers => "invite users",
            Self::RestrictMembers => "restrict members",
            Self::ManageChat => "manage the chat",
            Self::PostMessages => "post messages",
            Self::EditMessages => "edit messages",
            Self::ManageVideoChats => "manage video chats",
            Self::SendMessages => "send messages",
            Self::SendMedia => "send media",
            Self::SendOther => "send stickers and other messages",
            Self::SendPolls => "send polls",
            Self::AddWebPreviews => "add web page previews",
            Self::ManageTopics => "manage topics",
        }
    }
}

/// Privileges granted on a membership record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeSet(BTreeSet<Privilege>);

impl PrivilegeSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known privilege.
    pub fn all() -> Self {
        use strum::IntoEnumIterator;
        Privilege::iter().collect()
    }

    /// Whether a flag is granted.
    pub fn contains(&self, privilege: Privilege) -> bool {
        self.0.contains(&privilege)
    }

    /// Grant a flag.
    pub fn insert(&mut self, privilege: Privilege) -> bool {
        self.0.insert(privilege)
    }

    /// Number of granted flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flag is granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate granted flags.
    pub fn iter(&self) -> impl Iterator<Item = Privilege> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<I: IntoIterator<Item = Privilege>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The privileges a protected action requires.
///
/// Order is preserved (first occurrence wins on duplicates) so that notices
/// list missing flags in the order they were requested. An empty spec means
/// only a role-level check applies.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{PermissionSpec, Privilege};
///
/// let spec: PermissionSpec = "can_restrict_members, can_delete_messages".parse().unwrap();
/// assert_eq!(
///     spec.iter().collect::<Vec<_>>(),
///     vec![Privilege::RestrictMembers, Privilege::DeleteMessages]
/// );
/// assert!(PermissionSpec::none().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PermissionSpec(Vec<Privilege>);

impl PermissionSpec {
    /// No specific privilege required.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a list of bot API flag names.
    pub fn from_names<I, S>(names: I) -> Result<Self, strum::ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| Privilege::from_str(name.as_ref().trim()))
            .collect()
    }

    /// Whether nothing beyond the role is required.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of required flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether a flag is required.
    pub fn contains(&self, privilege: Privilege) -> bool {
        self.0.contains(&privilege)
    }

    /// Iterate required flags in request order.
    pub fn iter(&self) -> impl Iterator<Item = Privilege> + '_ {
        self.0.iter().copied()
    }

    /// Flag names joined for display, e.g. `can_pin_messages, can_invite_users`.
    pub fn names(&self) -> String {
        self.0
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<Privilege> for PermissionSpec {
    fn from_iter<I: IntoIterator<Item = Privilege>>(iter: I) -> Self {
        let mut flags = Vec::new();
        for privilege in iter {
            if !flags.contains(&privilege) {
                flags.push(privilege);
            }
        }
        Self(flags)
    }
}

impl From<Privilege> for PermissionSpec {
    fn from(privilege: Privilege) -> Self {
        Self(vec![privilege])
    }
}

impl<const N: usize> From<[Privilege; N]> for PermissionSpec {
    fn from(flags: [Privilege; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl FromStr for PermissionSpec {
    type Err = strum::ParseError;

    /// Accepts flag names separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_names(
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|name| !name.is_empty()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_deduplicates_in_order() {
        let spec: PermissionSpec = [
            Privilege::PinMessages,
            Privilege::InviteUsers,
            Privilege::PinMessages,
        ]
        .into();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.names(), "can_pin_messages, can_invite_users");
    }

    #[test]
    fn test_spec_rejects_unknown_flag() {
        assert!("can_fly".parse::<PermissionSpec>().is_err());
    }

    #[test]
    fn test_empty_string_is_empty_spec() {
        let spec: PermissionSpec = "  ".parse().unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_all_privileges() {
        let all = PrivilegeSet::all();
        assert_eq!(all.len(), 16);
        assert!(all.contains(Privilege::ManageTopics));
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        use strum::IntoEnumIterator;
        for privilege in Privilege::iter() {
            let parsed = Privilege::from_str(privilege.as_ref()).unwrap();
            assert_eq!(parsed, privilege);
        }
    }
}
