//! Chat descriptors.

use crate::ChatId;

/// Kind of conversation an event arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChatKind {
    /// One-to-one conversation with the bot
    Private,
    /// Basic group
    Group,
    /// Supergroup
    Supergroup,
    /// Broadcast channel
    Channel,
}

/// The chat an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chat {
    /// Chat id
    pub id: ChatId,
    /// Chat kind
    pub kind: ChatKind,
}

impl Chat {
    /// Create a chat descriptor.
    pub fn new(id: ChatId, kind: ChatKind) -> Self {
        Self { id, kind }
    }

    /// Whether admin semantics are meaningless here.
    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }
}
