//! Bot API seams.

use async_trait::async_trait;
use gatekeep_core::{CallbackRef, ChatId, InlineButton, MembershipRecord, MessageRef, UserId};
use gatekeep_error::{MemberError, TransportError};

/// Fetches membership records from the bot API.
///
/// Implementations must report "bad request"/"forbidden" answers as
/// `MemberErrorKind::NotFound` and everything else as
/// `MemberErrorKind::Transport`.
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Fetch the membership of `user_id` in `chat_id`.
    async fn fetch_member(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MembershipRecord, MemberError>;
}

/// Sends user-visible output.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Reply to a message, optionally with a row of inline buttons.
    ///
    /// Returns a reference to the sent message.
    async fn reply(
        &self,
        to: &MessageRef,
        text: &str,
        buttons: Option<Vec<InlineButton>>,
    ) -> Result<MessageRef, TransportError>;

    /// Answer a callback query, as a toast or as a modal alert.
    async fn acknowledge(
        &self,
        callback: &CallbackRef,
        text: &str,
        alert: bool,
    ) -> Result<(), TransportError>;

    /// Delete a message.
    async fn delete_message(&self, message: &MessageRef) -> Result<(), TransportError>;
}

/// A full bot API client: membership lookups plus replies.
pub trait ChatApi: MemberSource + ReplyChannel {}

impl<T> ChatApi for T where T: MemberSource + ReplyChannel {}
