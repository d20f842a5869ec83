//! Append-only transcript of one counseling session.

use uuid::Uuid;

use crate::message::ChatMessage;

/// Ordered, append-only log of the messages exchanged in one session.
///
/// Owned by the caller (the rendering layer) and passed to the pipeline
/// for each turn. [`append`](SessionHistory::append) is the only mutation
/// while the session is live; [`clear`](SessionHistory::clear) implements
/// the session-end reset.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    session_id: String,
    messages: Vec<ChatMessage>,
}

impl SessionHistory {
    /// Fresh, empty session with a generated id.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    /// Fresh session seeded with the counselor greeting as its first bot
    /// message, matching what a newly opened chat panel shows.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.append(ChatMessage::bot(greeting));
        history
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Append one message to the transcript.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Full transcript in chronological (append) order.
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recently appended message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop the transcript (session ended). The id is regenerated so a
    /// reused value cannot be confused with the previous session.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.session_id = Uuid::new_v4().to_string();
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatRole;

    #[test]
    fn append_preserves_exact_order() {
        let mut history = SessionHistory::new();
        for i in 0..10 {
            history.append(ChatMessage::user(format!("message {i}")));
        }

        let contents: Vec<&str> = history.all().iter().map(|m| m.content.as_str()).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("message {i}")).collect();
        assert_eq!(contents, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn greeting_seeds_first_bot_message() {
        let history = SessionHistory::with_greeting("안녕하세요!");
        assert_eq!(history.len(), 1);
        let first = history.last().unwrap();
        assert_eq!(first.role, ChatRole::Bot);
        assert_eq!(first.content, "안녕하세요!");
    }

    #[test]
    fn clear_resets_transcript_and_session_id() {
        let mut history = SessionHistory::with_greeting("안녕하세요!");
        let old_id = history.session_id().to_owned();

        history.clear();
        assert!(history.is_empty());
        assert_ne!(history.session_id(), old_id);
    }
}
