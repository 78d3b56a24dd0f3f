//! Server-rendered UI.
//!
//! Every function here returns HTML as a `String`; htmx swaps fragments into
//! the page and Alpine.js handles the few purely client-side behaviours
//! (auto-scroll, toast dismissal, Enter-to-send).
//!
//! # Structure
//!
//! - [`components`]: reusable ShadCN-style primitives
//! - [`chat`]: header, message list, input area and the layout shell
//! - [`results`]: document and chart panels
//! - [`page`]: full HTML documents

pub mod chat;
pub mod components;
pub mod page;
pub mod results;
