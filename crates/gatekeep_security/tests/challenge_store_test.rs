//! Tests for the anonymous-admin challenge store.

use gatekeep_core::{
    ANONYMOUS_ADMIN, Chat, ChatId, ChatKind, Invocation, InvocationBuilder, MessageId, MessageRef,
    PermissionSpec, Privilege, UserId,
};
use gatekeep_interface::{ActionError, ProtectedAction, action_fn};
use gatekeep_security::{ChallengeStore, ChallengeToken, Requirements, Resolution};
use std::sync::Arc;
use std::time::Duration;

const CHAT: ChatId = ChatId(-1_001_234_567);

fn anonymous_invocation(message_id: i64) -> Invocation {
    InvocationBuilder::default()
        .chat(Chat::new(CHAT, ChatKind::Supergroup))
        .user_id(ANONYMOUS_ADMIN)
        .sender_id(ANONYMOUS_ADMIN)
        .message(MessageRef::new(CHAT, MessageId(message_id)))
        .bot_id(UserId(42))
        .args(vec!["spam".to_string()])
        .build()
        .unwrap()
}

fn noop() -> Arc<dyn ProtectedAction> {
    Arc::new(action_fn(|_| async { Ok::<_, ActionError>(()) }))
}

fn pin_requirements() -> Requirements {
    Requirements {
        permissions: PermissionSpec::from(Privilege::PinMessages),
        check_user: true,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_issue_then_resolve_once() {
    let store = ChallengeStore::default();
    let token = store
        .issue(anonymous_invocation(10), noop(), pin_requirements())
        .await;

    assert_eq!(token, ChallengeToken::new(CHAT, MessageId(10)));
    assert_eq!(store.len().await, 1);

    let pending = store
        .resolve(&token)
        .await
        .into_pending()
        .expect("first resolution returns the challenge");
    assert_eq!(pending.token(), token);
    assert_eq!(pending.invocation().args(), &vec!["spam".to_string()]);
    assert_eq!(pending.requirements(), &pin_requirements());

    assert!(matches!(store.resolve(&token).await, Resolution::Unknown(_)));
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_resolve_after_ttl_is_expired() {
    let store = ChallengeStore::default();
    let token = store
        .issue(anonymous_invocation(11), noop(), pin_requirements())
        .await;

    tokio::time::advance(ChallengeStore::DEFAULT_TTL).await;

    let resolution = store.resolve(&token).await;
    assert!(matches!(resolution, Resolution::Expired(t) if t == token));
    assert!(resolution.into_pending().is_none());
    assert!(matches!(store.resolve(&token).await, Resolution::Unknown(_)));
}

#[tokio::test(start_paused = true)]
async fn test_resolve_just_before_ttl() {
    let store = ChallengeStore::default();
    let token = store
        .issue(anonymous_invocation(12), noop(), pin_requirements())
        .await;

    tokio::time::advance(ChallengeStore::DEFAULT_TTL - Duration::from_millis(1)).await;
    assert!(matches!(store.resolve(&token).await, Resolution::Resolved(_)));
}

#[tokio::test(start_paused = true)]
async fn test_reissue_overwrites() {
    let store = ChallengeStore::default();
    let first = store
        .issue(anonymous_invocation(13), noop(), pin_requirements())
        .await;
    let second = store
        .issue(anonymous_invocation(13), noop(), Requirements::default())
        .await;

    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);

    let pending = store.resolve(&second).await.into_pending().unwrap();
    assert_eq!(pending.requirements(), &Requirements::default());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_token() {
    let store = ChallengeStore::default();
    let token = ChallengeToken::new(CHAT, MessageId(999));
    assert!(matches!(store.resolve(&token).await, Resolution::Unknown(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolve_hands_out_once() {
    let store = Arc::new(ChallengeStore::default());
    let token = store
        .issue(anonymous_invocation(14), noop(), pin_requirements())
        .await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move { store.resolve(&token).await }));
    }

    let mut resolved = 0;
    for handle in handles {
        if let Resolution::Resolved(_) = handle.await.unwrap() {
            resolved += 1;
        }
    }
    assert_eq!(resolved, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cleanup_expired() {
    let store = ChallengeStore::default();
    store
        .issue(anonymous_invocation(15), noop(), pin_requirements())
        .await;
    tokio::time::advance(Duration::from_secs(30)).await;
    store
        .issue(anonymous_invocation(16), noop(), pin_requirements())
        .await;
    tokio::time::advance(Duration::from_secs(15)).await;

    assert_eq!(store.cleanup_expired().await, 1);
    assert_eq!(store.len().await, 1);
}
