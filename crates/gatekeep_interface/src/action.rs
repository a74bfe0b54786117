//! The protected action seam.

use async_trait::async_trait;
use gatekeep_core::Invocation;
use std::future::Future;

/// Error raised by a protected action itself.
///
/// Guards never inspect or wrap it; it reaches the dispatcher as raised.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Result of running a protected action.
pub type ActionResult = Result<(), ActionError>;

/// An action that only runs once the guard allows it.
#[async_trait]
pub trait ProtectedAction: Send + Sync {
    /// Run with the invocation that triggered it.
    async fn run(&self, invocation: &Invocation) -> ActionResult;
}

/// Adapter turning an async closure into a [`ProtectedAction`].
pub struct FnAction<F>(F);

/// Wrap an async closure as a protected action.
///
/// # Examples
///
/// ```
/// use gatekeep_interface::{ActionError, ProtectedAction, action_fn};
///
/// let action = action_fn(|invocation| async move {
///     let _args = invocation.args().len();
///     Ok::<_, ActionError>(())
/// });
/// # fn assert_action<A: ProtectedAction>(_: &A) {}
/// # assert_action(&action);
/// ```
pub fn action_fn<F, Fut>(f: F) -> FnAction<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    FnAction(f)
}

#[async_trait]
impl<F, Fut> ProtectedAction for FnAction<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    async fn run(&self, invocation: &Invocation) -> ActionResult {
        (self.0)(invocation.clone()).await
    }
}
