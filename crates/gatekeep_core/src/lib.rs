//! Core data types for gatekeep.
//!
//! These are the identities and snapshots handed to the guard by the
//! surrounding dispatch layer: chat, user and message ids, membership
//! records with their privilege flags, and the invocation/callback events.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod event;
mod ids;
mod member;
mod privilege;

pub use chat::{Chat, ChatKind};
pub use event::{
    CallbackEvent, CallbackRef, InlineButton, Invocation, InvocationBuilder,
    InvocationBuilderError, MessageRef, Origin,
};
pub use ids::{ANONYMOUS_ADMIN, ChatId, MessageId, UserId};
pub use member::{MemberStatus, MembershipRecord};
pub use privilege::{PermissionSpec, Privilege, PrivilegeSet};
