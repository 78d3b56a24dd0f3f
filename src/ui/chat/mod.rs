//! Chat layout components.
//!
//! The shell re-renders as one fragment (`#chat-root`) after every state
//! change; htmx swaps it in place.

mod header;
mod input_area;
mod message_list;
mod shell;

pub use header::render_header;
pub use input_area::render_input_area;
pub use message_list::{format_time, render_message, render_message_list};
pub use shell::{
    RenderedConversation, ShellOptions, TOAST_CONTAINER_ID, conversation_url, render_conversation,
    render_shell, render_toast,
};
