//! Admin verification middleware.
//!
//! [`AdminGuard`] wraps a [`ProtectedAction`](gatekeep_interface::ProtectedAction)
//! in a [`GuardPolicy`] and decides on every invocation whether it runs, is
//! refused with a notice, or is deferred behind an anonymous-admin
//! challenge. [`ChallengeResolver`] handles the verify button and runs
//! deferred actions once the presser proves they qualify.
//!
//! Both share one [`GuardContext`]: the bot API client, the membership
//! cache, the challenge store and the developer allowlist.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod denial;
mod error;
mod guard;
mod policy;
mod resolver;

pub use context::GuardContext;
pub use denial::{CHALLENGE_EXPIRED, CHALLENGE_PROMPT, Denial, VERIFY_BUTTON};
pub use error::{GuardError, GuardResult};
pub use guard::{AdminGuard, GuardOutcome};
pub use policy::{DeveloperSet, GuardPolicy, GuardPolicyBuilder, GuardPolicyBuilderError};
pub use resolver::{ChallengeResolver, ResolveOutcome};
