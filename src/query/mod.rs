//! Talking to the RAG query endpoint.
//!
//! - [`types`]: the `{query}` / `{answer, docs, chart}` wire contract
//! - [`client`]: the [`QueryBackend`] seam and its reqwest implementation
//! - [`fallback`]: demo content used when the endpoint fails
//! - [`dispatcher`]: one request per user turn, folded into conversation state

pub mod client;
pub mod dispatcher;
pub mod fallback;
pub mod types;

pub use client::{HttpQueryBackend, QueryBackend};
pub use dispatcher::{DispatchOutcome, PendingQuery, QueryDispatcher};
pub use types::{QueryRequest, QueryResponse, RetrievedDocument, StudyRecord};
