//! Trait definitions for the collaborators gatekeep sits between.
//!
//! The bot API transport is a black box: it fetches membership records and
//! accepts outgoing replies. The protected action is a black box too: the
//! guard only decides whether and when it runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod transport;

pub use action::{ActionError, ActionResult, FnAction, ProtectedAction, action_fn};
pub use transport::{ChatApi, MemberSource, ReplyChannel};
