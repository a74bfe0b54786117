//! Admin permission caching and anonymous-admin verification for chat bots.
//!
//! Wrap protected commands in an [`AdminGuard`] built from a [`GuardPolicy`];
//! route verify-button presses to the [`ChallengeResolver`]. A [`Gatekeeper`]
//! built from [`GatekeepConfig`] owns the shared caches behind both.
//!
//! # Quick start
//!
//! ```no_run
//! use gatekeep::{GatekeepConfig, init_tracing};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! init_tracing()?;
//! let config = GatekeepConfig::load()?;
//! // let gatekeeper = gatekeep::Gatekeeper::new(&config, my_bot_api);
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gatekeeper;
mod telemetry;

pub use config::{DEVS_VAR, GatekeepConfig};
pub use gatekeeper::Gatekeeper;
pub use telemetry::{init_json_tracing, init_tracing};

pub use gatekeep_cache::{CacheConfig, CacheConfigBuilder, CacheEntry, MemberCache, TtlCache};
pub use gatekeep_core::{
    ANONYMOUS_ADMIN, CallbackEvent, CallbackRef, Chat, ChatId, ChatKind, InlineButton,
    Invocation, InvocationBuilder, MemberStatus, MembershipRecord, MessageId, MessageRef, Origin,
    PermissionSpec, Privilege, PrivilegeSet, UserId,
};
pub use gatekeep_error::{
    ChallengeError, ChallengeErrorKind, ConfigError, GatekeepError, GatekeepErrorKind,
    GatekeepResult, MemberError, MemberErrorKind, TransportError,
};
pub use gatekeep_guard::{
    AdminGuard, ChallengeResolver, Denial, DeveloperSet, GuardContext, GuardError, GuardOutcome,
    GuardPolicy, GuardPolicyBuilder, GuardResult, ResolveOutcome,
};
pub use gatekeep_interface::{
    ActionError, ActionResult, ChatApi, FnAction, MemberSource, ProtectedAction, ReplyChannel,
    action_fn,
};
pub use gatekeep_security::{
    ChallengeStore, ChallengeToken, PermissionEvaluator, Requirements, Resolution, Shortfall,
    Subject,
};
