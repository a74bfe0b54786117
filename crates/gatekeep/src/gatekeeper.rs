//! Composition root.

use crate::GatekeepConfig;
use gatekeep_cache::MemberCache;
use gatekeep_guard::{AdminGuard, ChallengeResolver, DeveloperSet, GuardContext, GuardPolicy};
use gatekeep_interface::{ChatApi, MemberSource, ProtectedAction};
use gatekeep_security::ChallengeStore;
use std::sync::Arc;
use tracing::info;

/// Owns the process-wide caches and hands out guards and the resolver.
///
/// Build one per bot at startup; every guard it produces shares its
/// membership cache, challenge store and developer allowlist.
///
/// # Example
///
/// ```
/// use gatekeep::{ActionError, AdminGuard, ChatApi, GatekeepConfig, Gatekeeper, GuardPolicy, action_fn};
/// use std::sync::Arc;
///
/// fn wire<A: ChatApi + 'static>(api: Arc<A>) -> (Gatekeeper, AdminGuard) {
///     let gatekeeper = Gatekeeper::new(&GatekeepConfig::default(), api);
///     let ban = gatekeeper.guard(
///         GuardPolicy::default().with_require_both(true),
///         Arc::new(action_fn(|_invocation| async { Ok::<_, ActionError>(()) })),
///     );
///     (gatekeeper, ban)
/// }
/// ```
#[derive(Clone)]
pub struct Gatekeeper {
    context: GuardContext,
}

impl Gatekeeper {
    /// Build the shared state from configuration.
    pub fn new<A>(config: &GatekeepConfig, api: Arc<A>) -> Self
    where
        A: ChatApi + 'static,
    {
        let members = Arc::new(MemberCache::new(
            Arc::clone(&api) as Arc<dyn MemberSource>,
            config.member_cache().clone(),
        ));
        let challenges = Arc::new(ChallengeStore::new(config.challenges().clone()));
        let developers = Arc::new(config.developer_set());

        info!(
            member_ttl_secs = config.member_cache().ttl_secs(),
            challenge_ttl_secs = config.challenges().ttl_secs(),
            developers = developers.len(),
            "Gatekeeper ready"
        );

        Self {
            context: GuardContext::new(api, members, challenges, developers),
        }
    }

    /// Wrap an action in a policy.
    pub fn guard(&self, policy: GuardPolicy, action: Arc<dyn ProtectedAction>) -> AdminGuard {
        AdminGuard::new(self.context.clone(), policy, action)
    }

    /// Handler for verify-button presses.
    pub fn resolver(&self) -> ChallengeResolver {
        ChallengeResolver::new(self.context.clone())
    }

    /// Shared membership cache.
    pub fn cache(&self) -> &Arc<MemberCache> {
        self.context.members()
    }

    /// Shared challenge store.
    pub fn challenges(&self) -> &Arc<ChallengeStore> {
        self.context.challenges()
    }

    /// Developer allowlist.
    pub fn developers(&self) -> &Arc<DeveloperSet> {
        self.context.developers()
    }

    /// Purge expired entries from both caches, returning how many went.
    ///
    /// Expiry is enforced on access regardless; this only reclaims memory.
    pub async fn cleanup_expired(&self) -> usize {
        self.cache().cleanup_expired().await + self.challenges().cleanup_expired().await
    }
}
