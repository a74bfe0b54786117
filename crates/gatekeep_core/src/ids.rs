//! Platform identifiers.

use serde::{Deserialize, Serialize};

/// Chat identifier. Group and supergroup ids are negative.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ChatId(pub i64);

/// User identifier. Bots are users too.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Message identifier, monotonic within a chat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MessageId(pub i64);

/// Sender id the platform substitutes when an admin posts as the group.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{ANONYMOUS_ADMIN, UserId};
///
/// assert_eq!(ANONYMOUS_ADMIN, UserId(1087968824));
/// ```
pub const ANONYMOUS_ADMIN: UserId = UserId(1_087_968_824);
