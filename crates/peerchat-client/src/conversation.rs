use peerchat_types::Message;

/// Ordered message history for exactly one peer at a time.
///
/// Switching peers is a clear-then-load, never a merge: `replace` takes
/// the peer id the history belongs to, and `clear` forgets both the
/// messages and the id.
#[derive(Debug, Default)]
pub struct ConversationCache {
    peer_id: Option<i64>,
    messages: Vec<Message>,
}

impl ConversationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the full history for one peer, discarding whatever was held
    /// before.
    pub fn replace(&mut self, peer_id: i64, messages: Vec<Message>) {
        self.peer_id = Some(peer_id);
        self.messages = messages;
    }

    /// Add one message to the end without a re-fetch. Used after a
    /// successful send so the sender sees their own message immediately.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.peer_id = None;
        self.messages.clear();
    }

    pub fn peer_id(&self) -> Option<i64> {
        self.peer_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
