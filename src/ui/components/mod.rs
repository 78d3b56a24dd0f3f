//! ShadCN-style HTML building blocks.
//!
//! Each helper returns an HTML `String`. Arguments named `content` are
//! trusted markup; anything that came from a user or the query backend must
//! go through [`text`] or [`attr`] first.
//!
//! # Components
//!
//! - [`badge`]: pill-shaped score label
//! - [`button`]: clickable button with variants
//! - [`card`], [`card_header`], [`card_content`]: card container
//! - [`icons`]: inline SVG icons

use std::borrow::Cow;

mod badge;
mod button;
mod card;
pub mod icons;

pub use badge::badge;
pub use button::{ButtonSize, ButtonVariant, button};
pub use card::{card, card_content, card_header};

/// Escape text for an element body.
#[must_use]
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape text for a double-quoted attribute value.
#[must_use]
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(text("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(attr(r#"say "hi""#), "say &quot;hi&quot;");
    }
}
