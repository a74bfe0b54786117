//! The admin guard middleware.

use crate::context::Rejection;
use crate::{
    CHALLENGE_PROMPT, Denial, GuardContext, GuardError, GuardPolicy, GuardResult, VERIFY_BUTTON,
};
use async_trait::async_trait;
use gatekeep_core::{InlineButton, Invocation};
use gatekeep_interface::{ActionResult, ProtectedAction};
use gatekeep_security::ChallengeToken;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What happened to one guarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Every check passed and the action ran to completion
    Completed,
    /// A check failed; the action did not run
    Denied(Denial),
    /// The sender was an anonymous admin; the action waits on a challenge
    Challenged(ChallengeToken),
}

/// A protected action wrapped in a policy.
///
/// Each run applies, stopping at the first failure:
/// 1. private chat handling (run unchecked or refuse), skipped for
///    developer-only policies,
/// 2. the developer allowlist,
/// 3. anonymous-admin deferral via a challenge,
/// 4. bot and user membership lookups,
/// 5. the owner-only rule,
/// 6. role and privilege checks, bot first,
/// 7. the action itself.
///
/// Failure notices go to the invocation's origin unless the policy is
/// silent. The guard is itself a [`ProtectedAction`], so guards nest.
pub struct AdminGuard {
    context: GuardContext,
    policy: GuardPolicy,
    action: Arc<dyn ProtectedAction>,
}

impl AdminGuard {
    /// Wrap an action.
    pub fn new(
        context: GuardContext,
        policy: GuardPolicy,
        action: Arc<dyn ProtectedAction>,
    ) -> Self {
        Self {
            context,
            policy,
            action,
        }
    }

    /// Policy in force.
    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Run the checks and, if they pass, the action.
    ///
    /// Denials and challenges are outcomes, not errors. The action's own
    /// failure comes back as [`GuardError::Action`] holding the original
    /// error.
    #[instrument(
        skip(self, invocation),
        fields(
            chat_id = %invocation.chat().id,
            user_id = %invocation.user_id(),
            message = %invocation.message(),
        )
    )]
    pub async fn run(&self, invocation: &Invocation) -> GuardResult<GuardOutcome> {
        let chat = invocation.chat();

        if chat.is_private() && !*self.policy.dev_only() {
            if !*self.policy.allow_private_chat() {
                return self.deny(invocation, Denial::PrivateChat).await;
            }
            debug!("Private chat allowed, skipping admin checks");
            return self.execute(invocation).await;
        }

        if *self.policy.dev_only() && !self.context.developers().contains(*invocation.user_id()) {
            return self.deny(invocation, Denial::DevelopersOnly).await;
        }

        if invocation.is_anonymous_admin() {
            return self.challenge(invocation).await;
        }

        let requirements = self.policy.requirements();
        match self
            .context
            .verify(
                chat.id,
                *invocation.user_id(),
                *invocation.bot_id(),
                &requirements,
                false,
            )
            .await
        {
            Ok(()) => self.execute(invocation).await,
            Err(Rejection::Denied(denial)) => self.deny(invocation, denial).await,
            Err(Rejection::Transport(err)) => Err(err.into()),
        }
    }

    async fn execute(&self, invocation: &Invocation) -> GuardResult<GuardOutcome> {
        info!("Running protected action");
        self.action
            .run(invocation)
            .await
            .map_err(GuardError::Action)?;
        Ok(GuardOutcome::Completed)
    }

    async fn deny(&self, invocation: &Invocation, denial: Denial) -> GuardResult<GuardOutcome> {
        warn!(%denial, silent = *self.policy.silent_on_failure(), "Guard denied invocation");
        if !*self.policy.silent_on_failure() {
            self.context
                .notify(invocation, &denial.to_string())
                .await?;
        }
        Ok(GuardOutcome::Denied(denial))
    }

    async fn challenge(&self, invocation: &Invocation) -> GuardResult<GuardOutcome> {
        let token = self
            .context
            .challenges()
            .issue(
                invocation.clone(),
                Arc::clone(&self.action),
                self.policy.requirements(),
            )
            .await;

        let button = InlineButton::new(VERIFY_BUTTON, token.payload());
        self.context
            .api()
            .reply(invocation.message(), CHALLENGE_PROMPT, Some(vec![button]))
            .await?;

        info!(%token, "Deferred action pending anonymous admin verification");
        Ok(GuardOutcome::Challenged(token))
    }
}

#[async_trait]
impl ProtectedAction for AdminGuard {
    async fn run(&self, invocation: &Invocation) -> ActionResult {
        AdminGuard::run(self, invocation)
            .await
            .map(|_| ())
            .map_err(GuardError::into_boxed)
    }
}
