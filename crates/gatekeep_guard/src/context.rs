//! Shared state handed to every guard and to the resolver.

use crate::{Denial, DeveloperSet};
use gatekeep_cache::MemberCache;
use gatekeep_core::{ChatId, Invocation, MembershipRecord, Origin, UserId};
use gatekeep_error::TransportError;
use gatekeep_interface::ChatApi;
use gatekeep_security::{ChallengeStore, PermissionEvaluator, Requirements, Subject};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Process-wide collaborators and caches.
///
/// Cloning is cheap; clones share the same caches.
#[derive(Clone)]
pub struct GuardContext {
    api: Arc<dyn ChatApi>,
    members: Arc<MemberCache>,
    challenges: Arc<ChallengeStore>,
    developers: Arc<DeveloperSet>,
}

impl GuardContext {
    /// Bundle the shared state.
    pub fn new(
        api: Arc<dyn ChatApi>,
        members: Arc<MemberCache>,
        challenges: Arc<ChallengeStore>,
        developers: Arc<DeveloperSet>,
    ) -> Self {
        Self {
            api,
            members,
            challenges,
            developers,
        }
    }

    /// Bot API client.
    pub fn api(&self) -> &Arc<dyn ChatApi> {
        &self.api
    }

    /// Membership cache.
    pub fn members(&self) -> &Arc<MemberCache> {
        &self.members
    }

    /// Pending anonymous-admin challenges.
    pub fn challenges(&self) -> &Arc<ChallengeStore> {
        &self.challenges
    }

    /// Developer allowlist.
    pub fn developers(&self) -> &Arc<DeveloperSet> {
        &self.developers
    }

    /// Send a notice where the invocation came from: a reply for messages,
    /// an alert for button presses.
    pub(crate) async fn notify(
        &self,
        invocation: &Invocation,
        text: &str,
    ) -> Result<(), TransportError> {
        match invocation.origin() {
            Origin::Message => {
                self.api.reply(invocation.message(), text, None).await?;
            }
            Origin::Callback(callback) => {
                self.api.acknowledge(callback, text, true).await?;
            }
        }
        Ok(())
    }

    /// Fetch the records `requirements` calls for and check them.
    ///
    /// Order: bot lookup, user lookup, owner check, bot evaluation, user
    /// evaluation. The first failure wins.
    #[instrument(skip(self, requirements), fields(chat_id = %chat_id, user_id = %user_id))]
    pub(crate) async fn verify(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        bot_id: UserId,
        requirements: &Requirements,
        force_user_reload: bool,
    ) -> Result<(), Rejection> {
        let bot = if requirements.needs_bot_record() {
            Some(self.lookup(chat_id, bot_id, Subject::Bot, false).await?)
        } else {
            None
        };
        let user = if requirements.needs_user_record() {
            Some(
                self.lookup(chat_id, user_id, Subject::User, force_user_reload)
                    .await?,
            )
        } else {
            None
        };

        if requirements.owner_only
            && let Some(record) = &user
        {
            PermissionEvaluator::check_owner(record)
                .map_err(|shortfall| Denial::from_shortfall(Subject::User, shortfall))?;
        }

        if requirements.check_bot
            && let Some(record) = &bot
        {
            PermissionEvaluator::evaluate(Subject::Bot, record, &requirements.permissions)
                .map_err(|shortfall| Denial::from_shortfall(Subject::Bot, shortfall))?;
        }

        if requirements.check_user
            && let Some(record) = &user
        {
            PermissionEvaluator::evaluate(Subject::User, record, &requirements.permissions)
                .map_err(|shortfall| Denial::from_shortfall(Subject::User, shortfall))?;
        }

        debug!("Membership checks passed");
        Ok(())
    }

    async fn lookup(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        subject: Subject,
        force_reload: bool,
    ) -> Result<MembershipRecord, Rejection> {
        self.members
            .get(chat_id, user_id, force_reload)
            .await?
            .ok_or(Rejection::Denied(Denial::MemberUnavailable { subject }))
    }
}

/// Why [`GuardContext::verify`] stopped.
#[derive(Debug, derive_more::From)]
pub(crate) enum Rejection {
    /// A check failed
    Denied(Denial),
    /// The bot API failed
    Transport(TransportError),
}
