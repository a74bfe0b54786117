//! Shared fixtures for guard and resolver tests.

#![allow(dead_code)]

use async_trait::async_trait;
use gatekeep_cache::{CacheConfig, MemberCache};
use gatekeep_core::{
    CallbackRef, Chat, ChatId, ChatKind, InlineButton, Invocation, InvocationBuilder, MemberStatus,
    MembershipRecord, MessageId, MessageRef, Origin, Privilege, UserId,
};
use gatekeep_error::{MemberError, TransportError};
use gatekeep_guard::{DeveloperSet, GuardContext};
use gatekeep_interface::{ActionError, ActionResult, MemberSource, ProtectedAction, ReplyChannel};
use gatekeep_security::ChallengeStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const GROUP: ChatId = ChatId(-1_001_500_000);
pub const BOT: UserId = UserId(4242);
pub const ALICE: UserId = UserId(1001);
pub const DEV: UserId = UserId(7);

/// A reply the mock sent.
#[derive(Debug, Clone)]
pub struct SentReply {
    pub to: MessageRef,
    pub text: String,
    pub buttons: Option<Vec<InlineButton>>,
    pub sent: MessageRef,
}

/// Bot API double recording every call.
#[derive(Default)]
pub struct MockChatApi {
    members: Mutex<HashMap<(ChatId, UserId), MembershipRecord>>,
    failing: Mutex<bool>,
    fetches: Mutex<Vec<(ChatId, UserId)>>,
    replies: Mutex<Vec<SentReply>>,
    acks: Mutex<Vec<(CallbackRef, String, bool)>>,
    deleted: Mutex<Vec<MessageRef>>,
    next_message: AtomicI64,
}

impl MockChatApi {
    pub fn new() -> Self {
        Self {
            next_message: AtomicI64::new(10_000),
            ..Default::default()
        }
    }

    pub fn set_member(&self, user_id: UserId, status: MemberStatus, flags: &[Privilege]) {
        self.set_member_in(GROUP, user_id, status, flags);
    }

    pub fn set_member_in(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        status: MemberStatus,
        flags: &[Privilege],
    ) {
        let record =
            MembershipRecord::new(chat_id, user_id, status).with_privileges(flags.iter().copied());
        self.members
            .lock()
            .unwrap()
            .insert((chat_id, user_id), record);
    }

    pub fn fail_fetches(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn fetches_for(&self, user_id: UserId) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, user)| *user == user_id)
            .count()
    }

    pub fn replies(&self) -> Vec<SentReply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<(CallbackRef, String, bool)> {
        self.acks.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<MessageRef> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemberSource for MockChatApi {
    async fn fetch_member(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MembershipRecord, MemberError> {
        self.fetches.lock().unwrap().push((chat_id, user_id));
        if *self.failing.lock().unwrap() {
            return Err(MemberError::transport("connection reset"));
        }
        self.members
            .lock()
            .unwrap()
            .get(&(chat_id, user_id))
            .cloned()
            .ok_or_else(|| MemberError::not_found(chat_id.0, user_id.0))
    }
}

#[async_trait]
impl ReplyChannel for MockChatApi {
    async fn reply(
        &self,
        to: &MessageRef,
        text: &str,
        buttons: Option<Vec<InlineButton>>,
    ) -> Result<MessageRef, TransportError> {
        let id = self.next_message.fetch_add(1, Ordering::SeqCst);
        let sent = MessageRef::new(to.chat_id, MessageId(id));
        self.replies.lock().unwrap().push(SentReply {
            to: *to,
            text: text.to_string(),
            buttons,
            sent,
        });
        Ok(sent)
    }

    async fn acknowledge(
        &self,
        callback: &CallbackRef,
        text: &str,
        alert: bool,
    ) -> Result<(), TransportError> {
        self.acks
            .lock()
            .unwrap()
            .push((callback.clone(), text.to_string(), alert));
        Ok(())
    }

    async fn delete_message(&self, message: &MessageRef) -> Result<(), TransportError> {
        self.deleted.lock().unwrap().push(*message);
        Ok(())
    }
}

/// Action counting its runs and remembering the last invocation.
#[derive(Default)]
pub struct CountingAction {
    runs: AtomicUsize,
    last: Mutex<Option<Invocation>>,
}

impl CountingAction {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<Invocation> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProtectedAction for CountingAction {
    async fn run(&self, invocation: &Invocation) -> ActionResult {
        self.runs.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(invocation.clone());
        Ok(())
    }
}

/// Error raised by [`FailingAction`].
#[derive(Debug, PartialEq, Eq, derive_more::Display)]
#[display("ban list unavailable")]
pub struct BanListUnavailable;

impl std::error::Error for BanListUnavailable {}

/// Action that always fails with [`BanListUnavailable`].
pub struct FailingAction;

#[async_trait]
impl ProtectedAction for FailingAction {
    async fn run(&self, _invocation: &Invocation) -> ActionResult {
        Err(Box::new(BanListUnavailable) as ActionError)
    }
}

pub struct Harness {
    pub api: Arc<MockChatApi>,
    pub context: GuardContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_developers([DEV])
    }

    pub fn with_developers(developers: impl IntoIterator<Item = UserId>) -> Self {
        let api = Arc::new(MockChatApi::new());
        let members = Arc::new(MemberCache::new(api.clone(), CacheConfig::default()));
        let challenges = Arc::new(ChallengeStore::default());
        let developers = Arc::new(developers.into_iter().collect::<DeveloperSet>());
        let context = GuardContext::new(api.clone(), members, challenges, developers);
        Self { api, context }
    }
}

pub fn group_invocation(user_id: UserId, message_id: i64) -> Invocation {
    invocation(
        Chat::new(GROUP, ChatKind::Supergroup),
        user_id,
        user_id,
        message_id,
        Origin::Message,
    )
}

pub fn anonymous_invocation(message_id: i64) -> Invocation {
    invocation(
        Chat::new(GROUP, ChatKind::Supergroup),
        gatekeep_core::ANONYMOUS_ADMIN,
        gatekeep_core::ANONYMOUS_ADMIN,
        message_id,
        Origin::Message,
    )
}

pub fn private_invocation(user_id: UserId, message_id: i64) -> Invocation {
    let chat_id = ChatId(user_id.0);
    InvocationBuilder::default()
        .chat(Chat::new(chat_id, ChatKind::Private))
        .user_id(user_id)
        .sender_id(user_id)
        .message(MessageRef::new(chat_id, MessageId(message_id)))
        .bot_id(BOT)
        .build()
        .unwrap()
}

pub fn invocation(
    chat: Chat,
    user_id: UserId,
    sender_id: UserId,
    message_id: i64,
    origin: Origin,
) -> Invocation {
    InvocationBuilder::default()
        .chat(chat)
        .user_id(user_id)
        .sender_id(sender_id)
        .message(MessageRef::new(chat.id, MessageId(message_id)))
        .bot_id(BOT)
        .origin(origin)
        .args(vec!["@spammer".to_string()])
        .build()
        .unwrap()
}
