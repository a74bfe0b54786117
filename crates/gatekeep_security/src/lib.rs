//! Admin verification primitives.
//!
//! - [`PermissionEvaluator`] decides, from a membership record alone, whether
//!   an actor holds a role and the privileges a protected action requires.
//! - [`ChallengeStore`] parks protected actions issued by anonymous admins
//!   until someone proves they are an admin by pressing the verify button.
//!
//! # Challenge lifecycle
//!
//! ```text
//! Unverified --issue--> Challenged --resolve--> Resolved
//!                           |
//!                           +----ttl elapses---> Expired
//! ```
//!
//! A challenge is consumed exactly once: resolving removes it, and a second
//! resolution of the same token finds nothing.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod challenge;
mod permission;

pub use challenge::{ChallengeStore, ChallengeToken, PendingChallenge, Resolution};
pub use permission::{PermissionEvaluator, Requirements, Shortfall, Subject};
