//! Shared conversation handles and the in-memory store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use super::state::ChatState;
use crate::error::AppError;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One browser conversation.
///
/// Cheap to clone; all clones share the same state.
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

#[derive(Debug)]
struct ConversationInner {
    id: String,
    state: RwLock<ChatState>,
    /// Woken whenever the loading flag is cleared.
    idle: Notify,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Conversation {
    fn new(id: String, welcome: &str) -> Self {
        Self {
            inner: Arc::new(ConversationInner {
                id,
                state: RwLock::new(ChatState::new(welcome)),
                idle: Notify::new(),
                last_activity: RwLock::new(Utc::now()),
            }),
        }
    }

    /// Conversation id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ChatState {
        self.read(ChatState::clone)
    }

    /// Run `f` against the state under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` against the state under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut guard);
        drop(guard);
        self.touch();
        result
    }

    /// True while a query is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(ChatState::is_loading)
    }

    /// Append the user's turn and mark the conversation busy.
    ///
    /// The returned guard clears the loading flag when dropped.
    pub fn begin_request(&self, text: &str) -> Result<(String, InFlightGuard), AppError> {
        let query = self.update(|state| state.begin_request(text))?;
        Ok((
            query,
            InFlightGuard {
                conversation: self.clone(),
            },
        ))
    }

    /// Resolve once no query is in flight.
    pub async fn wait_idle(&self) {
        loop {
            // Register before checking so a wakeup between the check and the
            // await is not lost.
            let notified = self.inner.idle.notified();
            if !self.is_loading() {
                return;
            }
            notified.await;
        }
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Time since last activity exceeds `timeout` and nothing is in flight.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        if self.is_loading() {
            return false;
        }
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative durations (clock skew) never expire.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Marks a conversation as awaiting a response.
///
/// Dropping it leaves the awaiting-response state and wakes
/// [`Conversation::wait_idle`] callers.
#[derive(Debug)]
pub struct InFlightGuard {
    conversation: Conversation,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.conversation.update(ChatState::finish_request);
        self.conversation.inner.idle.notify_waiters();
    }
}

/// Thread-safe store of live conversations.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    inner: Arc<ConversationStoreInner>,
}

#[derive(Debug)]
struct ConversationStoreInner {
    conversations: RwLock<HashMap<String, Conversation>>,
    welcome: String,
}

impl ConversationStore {
    /// Empty store; new conversations open with `welcome`.
    #[must_use]
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ConversationStoreInner {
                conversations: RwLock::new(HashMap::new()),
                welcome: welcome.into(),
            }),
        }
    }

    /// Start a new conversation.
    #[must_use]
    pub fn create(&self) -> Conversation {
        let conversation = Conversation::new(Uuid::new_v4().to_string(), &self.inner.welcome);
        self.inner
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(conversation.id().to_string(), conversation.clone());
        conversation
    }

    /// Look up a conversation.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.inner
            .conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Look up a conversation or fail with [`AppError::ConversationNotFound`].
    pub fn require(&self, id: &str) -> Result<Conversation, AppError> {
        self.get(id)
            .ok_or_else(|| AppError::ConversationNotFound(id.to_string()))
    }

    /// Drop a conversation.
    pub fn remove(&self, id: &str) -> Option<Conversation> {
        self.inner
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Number of live conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no conversations are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove conversations idle for longer than `timeout`.
    ///
    /// Returns the number removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, conversation| !conversation.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
