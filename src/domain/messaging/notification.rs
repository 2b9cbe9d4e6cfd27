//! User notifications.
//!
//! A notification row exists while it is unread: the recipient deletes it to
//! acknowledge, so there is no read flag. Messages may embed markup (e.g. a
//! link to a review page); any user-supplied fragment must go through
//! [`html_escape`] before being embedded.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NotificationId, UserId};

/// An unread notification for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id of this notification.
    pub id: NotificationId,
    /// The user this notification is for.
    pub recipient: UserId,
    /// Human-readable, HTML-safe message. May contain markup added by the
    /// composing code; user-supplied fragments are escaped at source.
    pub message: String,
}

impl Notification {
    /// Creates a new notification record.
    pub fn new(id: NotificationId, recipient: UserId, message: impl Into<String>) -> Self {
        Self {
            id,
            recipient,
            message: message.into(),
        }
    }
}

/// Escapes the five HTML-significant characters in a user-supplied fragment.
pub fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_new_creates_record() {
        let n = Notification::new(NotificationId::new(1), UserId::new(3), "hello");
        assert_eq!(n.id, NotificationId::new(1));
        assert_eq!(n.recipient, UserId::new(3));
        assert_eq!(n.message, "hello");
    }

    #[test]
    fn html_escape_passes_plain_text_through() {
        assert_eq!(html_escape("alice_42"), "alice_42");
    }

    #[test]
    fn html_escape_escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn html_escape_escapes_ampersand_first() {
        assert_eq!(html_escape("a&b"), "a&amp;b");
    }

    #[test]
    fn html_escape_escapes_single_quote() {
        assert_eq!(html_escape("o'brien"), "o&#x27;brien");
    }
}
