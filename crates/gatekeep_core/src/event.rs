//! Incoming events as seen by the guard.
//!
//! The dispatch layer translates its framework-native update objects into
//! these plain values before handing them to a guard or resolver.

use crate::{ANONYMOUS_ADMIN, Chat, ChatId, MessageId, UserId};
use derive_builder::Builder;
use derive_getters::Getters;

/// Reference to a message that can be replied to or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}/{}", chat_id, message_id)]
pub struct MessageRef {
    /// Chat the message lives in
    pub chat_id: ChatId,
    /// Message id within the chat
    pub message_id: MessageId,
}

impl MessageRef {
    /// Create a message reference.
    pub fn new(chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

/// Opaque callback query id, used to answer the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub struct CallbackRef(pub String);

/// Where a guarded invocation came from.
///
/// Notices for message origins are sent as replies; notices for callback
/// origins are sent as alert acknowledgements of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Origin {
    /// A plain message or command
    #[default]
    Message,
    /// A button press
    Callback(CallbackRef),
}

/// Interactive button attached to an outgoing reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct InlineButton {
    text: String,
    payload: String,
}

impl InlineButton {
    /// Create a callback button.
    pub fn new(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: payload.into(),
        }
    }
}

/// One invocation of a protected action.
///
/// Captures everything the action needs to run later, so that a deferred
/// (challenged) invocation can be replayed verbatim once verified.
///
/// # Examples
///
/// ```
/// use gatekeep_core::{Chat, ChatId, ChatKind, InvocationBuilder, MessageId, MessageRef, UserId};
///
/// let invocation = InvocationBuilder::default()
///     .chat(Chat::new(ChatId(-1001), ChatKind::Supergroup))
///     .user_id(UserId(7))
///     .sender_id(UserId(7))
///     .message(MessageRef::new(ChatId(-1001), MessageId(55)))
///     .bot_id(UserId(99))
///     .build()
///     .unwrap();
///
/// assert!(!invocation.is_anonymous_admin());
/// assert!(invocation.args().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct Invocation {
    /// Chat the invocation happened in
    chat: Chat,
    /// Effective user
    user_id: UserId,
    /// Author of the triggering message; the anonymous-admin sentinel when an
    /// admin posted as the group
    sender_id: UserId,
    /// Triggering message
    message: MessageRef,
    /// The bot's own user id
    bot_id: UserId,
    /// Message or callback origin
    #[builder(default)]
    origin: Origin,
    /// Command arguments, opaque to the guard
    #[builder(default)]
    args: Vec<String>,
}

impl Invocation {
    /// Whether the sender is hidden behind the group identity.
    pub fn is_anonymous_admin(&self) -> bool {
        self.sender_id == ANONYMOUS_ADMIN
    }
}

/// A press on an interactive button.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CallbackEvent {
    /// Query id
    callback: CallbackRef,
    /// The user who pressed the button (never anonymous)
    from: UserId,
    /// The message carrying the button
    message: MessageRef,
    /// Button payload
    data: String,
    /// The bot's own user id
    bot_id: UserId,
}

impl CallbackEvent {
    /// Create a callback event.
    pub fn new(
        callback: impl Into<CallbackRef>,
        from: UserId,
        message: MessageRef,
        data: impl Into<String>,
        bot_id: UserId,
    ) -> Self {
        Self {
            callback: callback.into(),
            from,
            message,
            data: data.into(),
            bot_id,
        }
    }
}
