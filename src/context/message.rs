use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context_items::Meta;

type MessageFn = dyn Fn(Option<&Value>, &Meta<'_>) -> String + Send + Sync;

/// An error message, either fixed or computed from the failing value.
///
/// # Example
///
/// ```rust
/// use fieldguard::Message;
///
/// let fixed: Message = "must be an integer".into();
/// let dynamic = Message::dynamic(|value, meta| {
///     let shown = value.map(|v| v.to_string()).unwrap_or_default();
///     format!("{} is not valid for {}", shown, meta.path)
/// });
/// # let _ = (fixed, dynamic);
/// ```
#[derive(Clone)]
pub enum Message {
    /// A fixed message.
    Text(String),
    /// A message computed from the value and its metadata.
    Dynamic(Arc<MessageFn>),
}

impl Message {
    /// Creates a message computed at failure time.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Meta<'_>) -> String + Send + Sync + 'static,
    {
        Message::Dynamic(Arc::new(f))
    }

    /// Produces the message text for a failing value.
    pub fn render(&self, value: Option<&Value>, meta: &Meta<'_>) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Dynamic(f) => f(value, meta),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}
