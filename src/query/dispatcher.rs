//! Per-turn query dispatch.
//!
//! A turn runs in two phases so the caller can render between them:
//! [`QueryDispatcher::begin`] appends the user turn and disables input,
//! [`QueryDispatcher::complete`] calls the backend and applies the answer or
//! the demo fallback. The in-flight guard travels with [`PendingQuery`], so
//! input is re-enabled on every exit path.

use std::fmt;
use std::sync::Arc;

use super::client::QueryBackend;
use crate::error::AppError;
use crate::session::{Conversation, InFlightGuard};

/// How a turn was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The backend answered.
    Answered,
    /// The backend failed; demo content was shown.
    Fallback,
}

/// A submitted turn awaiting its answer.
#[derive(Debug)]
pub struct PendingQuery {
    conversation: Conversation,
    query: String,
    guard: InFlightGuard,
}

impl PendingQuery {
    /// The (trimmed) query text being sent.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The conversation this turn belongs to.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

/// Sends user turns to a [`QueryBackend`] and folds the results into state.
#[derive(Clone)]
pub struct QueryDispatcher {
    backend: Arc<dyn QueryBackend>,
}

impl fmt::Debug for QueryDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDispatcher").finish_non_exhaustive()
    }
}

impl QueryDispatcher {
    /// Dispatcher over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self { backend }
    }

    /// Append the user turn and enter the awaiting-response state.
    pub fn begin(&self, conversation: &Conversation, text: &str) -> Result<PendingQuery, AppError> {
        let (query, guard) = conversation.begin_request(text)?;
        tracing::info!(
            name: "query.dispatch.begin",
            conversation_id = %conversation.id(),
            query_len = query.len(),
            "Query submitted"
        );
        Ok(PendingQuery {
            conversation: conversation.clone(),
            query,
            guard,
        })
    }

    /// Call the backend and apply the answer, or the demo fallback on any
    /// failure. Never returns an error.
    pub async fn complete(&self, pending: PendingQuery) -> DispatchOutcome {
        let PendingQuery {
            conversation,
            query,
            guard,
        } = pending;

        let outcome = match self.backend.query(&query).await {
            Ok(response) => {
                tracing::info!(
                    name: "query.dispatch.answered",
                    conversation_id = %conversation.id(),
                    docs = response.docs.len(),
                    studies = response.chart.len(),
                    "Query answered"
                );
                conversation.update(|state| state.apply_response(response));
                DispatchOutcome::Answered
            }
            Err(error) => {
                tracing::warn!(
                    name: "query.dispatch.fallback",
                    conversation_id = %conversation.id(),
                    error = %error,
                    "Query failed, showing demo content"
                );
                conversation.update(|state| state.apply_fallback(&query));
                DispatchOutcome::Fallback
            }
        };

        drop(guard);
        outcome
    }

    /// [`begin`](Self::begin) then [`complete`](Self::complete).
    pub async fn submit(
        &self,
        conversation: &Conversation,
        text: &str,
    ) -> Result<DispatchOutcome, AppError> {
        let pending = self.begin(conversation, text)?;
        Ok(self.complete(pending).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::query::{QueryResponse, RetrievedDocument, StudyRecord};
    use crate::session::ConversationStore;
    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    struct Canned;

    #[async_trait]
    impl QueryBackend for Canned {
        async fn query(&self, query: &str) -> Result<QueryResponse, QueryError> {
            Ok(QueryResponse {
                answer: format!("About {query}"),
                docs: vec![RetrievedDocument {
                    id: "d1".into(),
                    title: "Viking Lander Results".into(),
                    score: 0.923,
                    snippet: None,
                }],
                chart: vec![StudyRecord {
                    title: "Regolith Chemistry".into(),
                    score: 0.4,
                }],
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl QueryBackend for Unreachable {
        async fn query(&self, _query: &str) -> Result<QueryResponse, QueryError> {
            Err(QueryError::Status { status: 502 })
        }
    }

    /// Blocks until a permit is added.
    struct Gated(Arc<Semaphore>);

    #[async_trait]
    impl QueryBackend for Gated {
        async fn query(&self, query: &str) -> Result<QueryResponse, QueryError> {
            let _permit = self.0.acquire().await.expect("semaphore closed");
            Canned.query(query).await
        }
    }

    #[tokio::test]
    async fn turn_count_grows_by_two_per_submission() {
        let store = ConversationStore::new("welcome");
        let conversation = store.create();
        let dispatcher = QueryDispatcher::new(Arc::new(Canned));

        for n in 1..=4 {
            let outcome = dispatcher
                .submit(&conversation, &format!("question {n}"))
                .await
                .unwrap();
            assert_eq!(outcome, DispatchOutcome::Answered);
            assert_eq!(conversation.snapshot().turns().len(), 1 + 2 * n);
        }

        let state = conversation.snapshot();
        let last = state.turns().last().unwrap();
        assert_eq!(last.text(), "About question 4");
        assert!(!last.is_from_user());
        assert_eq!(state.documents().len(), 1);
        assert_eq!(state.studies().len(), 1);
    }

    #[tokio::test]
    async fn failure_falls_back_to_demo_content() {
        let store = ConversationStore::new("welcome");
        let conversation = store.create();
        let dispatcher = QueryDispatcher::new(Arc::new(Unreachable));

        let outcome = dispatcher.submit(&conversation, "Mars rovers").await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Fallback);

        let state = conversation.snapshot();
        assert_eq!(state.turns().len(), 3);
        assert!(state.turns()[2].text().contains("Mars rovers"));
        assert_eq!(state.documents().len(), 3);
        assert_eq!(state.studies().len(), 4);
        assert!(state.notice().is_some());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn input_disabled_until_completion() {
        let store = ConversationStore::new("welcome");
        let conversation = store.create();
        let gate = Arc::new(Semaphore::new(0));
        let dispatcher = QueryDispatcher::new(Arc::new(Gated(Arc::clone(&gate))));

        let pending = dispatcher.begin(&conversation, "Cassini").unwrap();
        assert_eq!(pending.query(), "Cassini");
        assert_eq!(pending.conversation().id(), conversation.id());
        assert!(conversation.is_loading());
        // The user turn is visible before the backend answers.
        assert_eq!(conversation.snapshot().turns().len(), 2);

        let task = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.complete(pending).await })
        };
        tokio::task::yield_now().await;
        assert!(conversation.is_loading());
        assert!(matches!(
            dispatcher.begin(&conversation, "overlap"),
            Err(AppError::Busy)
        ));

        gate.add_permits(1);
        assert_eq!(task.await.unwrap(), DispatchOutcome::Answered);
        assert!(!conversation.is_loading());
        assert_eq!(conversation.snapshot().turns().len(), 3);
    }

    #[tokio::test]
    async fn blank_submission_sends_nothing() {
        let store = ConversationStore::new("welcome");
        let conversation = store.create();
        let dispatcher = QueryDispatcher::new(Arc::new(Unreachable));

        assert!(matches!(
            dispatcher.submit(&conversation, "  ").await,
            Err(AppError::EmptyMessage)
        ));
        assert_eq!(conversation.snapshot().turns().len(), 1);
    }
}
