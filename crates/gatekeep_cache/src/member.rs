//! Membership cache in front of the bot API.

use crate::{CacheConfig, TtlCache};
use gatekeep_core::{ChatId, MembershipRecord, UserId};
use gatekeep_error::TransportError;
use gatekeep_interface::MemberSource;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Cache key for a membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey {
    /// Chat id
    pub chat_id: ChatId,
    /// User id
    pub user_id: UserId,
}

/// Time-bounded cache of (chat, user) membership records.
///
/// Shared process-wide. Every read, insert and eviction happens under an
/// internal lock; the lock is never held while the bot API is being called,
/// so a cache miss suspends only its own caller.
pub struct MemberCache {
    source: Arc<dyn MemberSource>,
    entries: Mutex<TtlCache<MemberKey, MembershipRecord>>,
}

impl MemberCache {
    /// Create a cache in front of a membership source.
    pub fn new(source: Arc<dyn MemberSource>, config: CacheConfig) -> Self {
        Self {
            source,
            entries: Mutex::new(TtlCache::new(config)),
        }
    }

    /// Look up a membership record.
    ///
    /// A live cached record is returned without calling the API unless
    /// `force_reload` is set. Otherwise exactly one fetch is issued: a found
    /// record is cached and returned, a not-found answer yields `Ok(None)`
    /// and is not cached, and any other failure is returned as a
    /// [`TransportError`].
    #[instrument(skip(self), fields(chat_id = %chat_id, user_id = %user_id))]
    pub async fn get(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        force_reload: bool,
    ) -> Result<Option<MembershipRecord>, TransportError> {
        let key = MemberKey { chat_id, user_id };

        if !force_reload
            && let Some(record) = self.entries.lock().await.get(&key).cloned()
        {
            debug!("Member cache hit");
            return Ok(Some(record));
        }

        debug!(force_reload, "Member cache miss, fetching from API");
        match self.source.fetch_member(chat_id, user_id).await {
            Ok(record) => {
                self.entries.lock().await.insert(key, record.clone());
                Ok(Some(record))
            }
            Err(e) if e.is_not_found() => {
                debug!("Member not found");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Membership lookup failed");
                Err(e.into_transport())
            }
        }
    }

    /// Drop the cached record for one member.
    pub async fn invalidate(&self, chat_id: ChatId, user_id: UserId) {
        self.entries
            .lock()
            .await
            .remove(&MemberKey { chat_id, user_id });
        debug!(%chat_id, %user_id, "Invalidated member cache entry");
    }

    /// Drop every cached record.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Purge expired records, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.entries.lock().await.cleanup_expired()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
