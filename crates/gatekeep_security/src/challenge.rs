//! Deferred protected actions awaiting anonymous-admin verification.

use crate::Requirements;
use gatekeep_cache::{CacheConfig, TtlCache};
use gatekeep_core::{ChatId, Invocation, MessageId, MessageRef};
use gatekeep_error::{ChallengeError, ChallengeErrorKind};
use gatekeep_interface::ProtectedAction;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const PAYLOAD_PREFIX: &str = "anon.";

/// Handle binding a challenge to the message that triggered it.
///
/// The (chat, message) pair is collision-free since message ids are unique
/// within a chat. Only the message id travels in the button payload; the chat
/// is recovered from the message the button is attached to.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{ChatId, MessageId};
/// use gatekeep_security::ChallengeToken;
///
/// let token = ChallengeToken::new(ChatId(-1001), MessageId(42));
/// assert_eq!(token.payload(), "anon.42");
///
/// let parsed = ChallengeToken::from_payload(ChatId(-1001), "anon.42").unwrap();
/// assert_eq!(parsed, token);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}:{}", chat_id, message_id)]
pub struct ChallengeToken {
    chat_id: ChatId,
    message_id: MessageId,
}

impl ChallengeToken {
    /// Combine a chat and message into a token.
    pub fn new(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }

    /// Token for a message reference.
    pub fn for_message(message: &MessageRef) -> Self {
        Self::new(message.chat_id, message.message_id)
    }

    /// Chat component.
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Message component.
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Button payload embedding this token.
    pub fn payload(&self) -> String {
        format!("{}{}", PAYLOAD_PREFIX, self.message_id)
    }

    /// Recover a token from a button payload and the chat it was pressed in.
    pub fn from_payload(chat_id: ChatId, payload: &str) -> Result<Self, ChallengeError> {
        let message_id = payload
            .strip_prefix(PAYLOAD_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| {
                ChallengeError::new(ChallengeErrorKind::MalformedPayload(payload.to_string()))
            })?;
        Ok(Self::new(chat_id, MessageId(message_id)))
    }
}

/// A protected action parked until an admin verifies.
#[derive(Clone)]
pub struct PendingChallenge {
    token: ChallengeToken,
    invocation: Invocation,
    action: Arc<dyn ProtectedAction>,
    requirements: Requirements,
}

impl PendingChallenge {
    /// Token it was issued under.
    pub fn token(&self) -> ChallengeToken {
        self.token
    }

    /// The original invocation, replayed when the action runs.
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// The deferred action.
    pub fn action(&self) -> &Arc<dyn ProtectedAction> {
        &self.action
    }

    /// What the verifying user (and bot) must satisfy.
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }
}

impl std::fmt::Debug for PendingChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingChallenge")
            .field("token", &self.token)
            .field("invocation", &self.invocation)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a token.
#[derive(Debug)]
pub enum Resolution {
    /// The challenge was live; it is now consumed.
    Resolved(PendingChallenge),
    /// The challenge existed but its window had closed; it is now discarded.
    Expired(ChallengeToken),
    /// No challenge under this token: never issued or already consumed.
    Unknown(ChallengeToken),
}

impl Resolution {
    /// The pending challenge, if resolution succeeded.
    pub fn into_pending(self) -> Option<PendingChallenge> {
        match self {
            Self::Resolved(pending) => Some(pending),
            Self::Expired(_) | Self::Unknown(_) => None,
        }
    }
}

/// Time-bounded registry of pending challenges.
///
/// Shared process-wide. `issue` and `resolve` each run under one lock
/// acquisition, so concurrent issues for a token never interleave and a
/// challenge is handed to at most one resolver.
pub struct ChallengeStore {
    pending: Mutex<TtlCache<ChallengeToken, PendingChallenge>>,
}

impl ChallengeStore {
    /// Window during which a verify button stays meaningful.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(40);

    /// Default bound on simultaneously pending challenges.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create a store.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            pending: Mutex::new(TtlCache::new(config)),
        }
    }

    /// Default configuration: 40 second window, 1024 pending challenges.
    pub fn default_config() -> CacheConfig {
        CacheConfig::new(Self::DEFAULT_TTL, Self::DEFAULT_CAPACITY)
    }

    /// Park an action under the token of its triggering message.
    ///
    /// A second challenge for the same message replaces the first.
    #[instrument(skip_all, fields(message = %invocation.message()))]
    pub async fn issue(
        &self,
        invocation: Invocation,
        action: Arc<dyn ProtectedAction>,
        requirements: Requirements,
    ) -> ChallengeToken {
        let token = ChallengeToken::for_message(invocation.message());
        let pending = PendingChallenge {
            token,
            invocation,
            action,
            requirements,
        };
        self.pending.lock().await.insert(token, pending);
        debug!(%token, "Issued anonymous admin challenge");
        token
    }

    /// Consume a challenge.
    ///
    /// Returns the pending challenge once; every later call for the same token
    /// reports [`Resolution::Unknown`]. A challenge past its window reports
    /// [`Resolution::Expired`] and is discarded.
    #[instrument(skip(self), fields(token = %token))]
    pub async fn resolve(&self, token: &ChallengeToken) -> Resolution {
        let entry = self.pending.lock().await.take(token);
        match entry {
            None => {
                debug!("No pending challenge for token");
                Resolution::Unknown(*token)
            }
            Some(entry) if entry.is_expired() => {
                debug!("Challenge expired before resolution");
                Resolution::Expired(*token)
            }
            Some(entry) => {
                debug!("Challenge resolved");
                Resolution::Resolved(entry.into_value())
            }
        }
    }

    /// Purge expired challenges, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.pending.lock().await.cleanup_expired()
    }

    /// Number of stored challenges.
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Whether nothing is pending.
    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}

impl Default for ChallengeStore {
    fn default() -> Self {
        Self::new(Self::default_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let token = ChallengeToken::new(ChatId(-1001234), MessageId(987));
        let parsed = ChallengeToken::from_payload(ChatId(-1001234), &token.payload()).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_malformed_payload() {
        for payload in ["", "anon.", "anon.x", "verify.12", "12"] {
            let err = ChallengeToken::from_payload(ChatId(-1), payload).unwrap_err();
            assert!(matches!(
                err.kind(),
                ChallengeErrorKind::MalformedPayload(_)
            ));
        }
    }

    #[test]
    fn test_token_display() {
        let token = ChallengeToken::new(ChatId(-100), MessageId(5));
        assert_eq!(token.to_string(), "-100:5");
    }
}
