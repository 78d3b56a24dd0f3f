//! Conversation state and storage.
//!
//! Every browser tab gets its own conversation, kept in memory only. The
//! layout shell's state (turns, results, loading flag, sidebar) lives in a
//! [`ChatState`] owned by a [`Conversation`].
//!
//! # Architecture
//!
//! - [`ChatState`]: plain state and its transitions
//! - [`Conversation`]: shared, lock-protected handle with in-flight signalling
//! - [`ConversationStore`]: thread-safe map of live conversations
//!
//! # Example
//!
//! ```rust
//! use rag_chat_htmx::session::ConversationStore;
//!
//! let store = ConversationStore::new("Hello!");
//! let conversation = store.create();
//!
//! let (query, guard) = conversation.begin_request("Apollo 11").unwrap();
//! assert_eq!(query, "Apollo 11");
//! assert!(conversation.is_loading());
//!
//! drop(guard);
//! assert_eq!(conversation.snapshot().turns().len(), 2);
//! assert!(!conversation.is_loading());
//! ```

mod conversation;
mod state;

pub use conversation::{Conversation, ConversationStore, DEFAULT_IDLE_TIMEOUT, InFlightGuard};
pub use state::{Author, ChatState, ChatTurn, Notice, Panel};
