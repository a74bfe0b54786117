//! Verify-button handling for anonymous-admin challenges.

use crate::context::Rejection;
use crate::{CHALLENGE_EXPIRED, Denial, GuardContext, GuardError, GuardResult};
use gatekeep_core::CallbackEvent;
use gatekeep_security::{ChallengeToken, Resolution};
use tracing::{info, instrument, warn};

/// What happened to one verify press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The presser verified and the deferred action ran
    Completed(ChallengeToken),
    /// The presser failed verification; the challenge is consumed
    Denied(Denial),
    /// Malformed payload, unknown token, already consumed or past its window
    Expired,
}

/// Consumes challenges when their verify button is pressed.
///
/// The presser is never anonymous, so their own membership decides. The
/// user side is always checked; bot-side and owner-only requirements
/// recorded with the challenge are checked again. The prompt is removed
/// whatever the result.
#[derive(Clone)]
pub struct ChallengeResolver {
    context: GuardContext,
}

impl ChallengeResolver {
    /// Create a resolver over shared state.
    pub fn new(context: GuardContext) -> Self {
        Self { context }
    }

    /// Handle a verify press.
    ///
    /// The deferred action's own failure is returned as
    /// [`GuardError::Action`] holding the original error.
    #[instrument(
        skip(self, event),
        fields(from = %event.from(), prompt = %event.message(), data = %event.data())
    )]
    pub async fn resolve(&self, event: &CallbackEvent) -> GuardResult<ResolveOutcome> {
        let api = self.context.api();

        let pending = match ChallengeToken::from_payload(event.message().chat_id, event.data()) {
            Ok(token) => match self.context.challenges().resolve(&token).await {
                Resolution::Resolved(pending) => Some(pending),
                Resolution::Expired(_) | Resolution::Unknown(_) => None,
            },
            Err(e) => {
                warn!(error = %e, "Verify press without a challenge token");
                None
            }
        };

        let Some(pending) = pending else {
            info!("Challenge expired or already consumed");
            api.acknowledge(event.callback(), CHALLENGE_EXPIRED, true)
                .await?;
            api.delete_message(event.message()).await?;
            return Ok(ResolveOutcome::Expired);
        };

        let invocation = pending.invocation();
        let mut requirements = pending.requirements().clone();
        requirements.check_user = true;

        let verdict = self
            .context
            .verify(
                invocation.chat().id,
                *event.from(),
                *event.bot_id(),
                &requirements,
                true,
            )
            .await;

        match verdict {
            Ok(()) => {}
            Err(Rejection::Denied(denial)) => {
                warn!(%denial, "Verify press rejected");
                api.acknowledge(event.callback(), &denial.to_string(), true)
                    .await?;
                api.delete_message(event.message()).await?;
                return Ok(ResolveOutcome::Denied(denial));
            }
            Err(Rejection::Transport(err)) => return Err(err.into()),
        }

        api.delete_message(event.message()).await?;
        info!(token = %pending.token(), "Anonymous admin verified, running deferred action");
        pending
            .action()
            .run(invocation)
            .await
            .map_err(GuardError::Action)?;
        Ok(ResolveOutcome::Completed(pending.token()))
    }
}
