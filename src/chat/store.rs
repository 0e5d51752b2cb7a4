use crate::models::Message;

/// Callback invoked with the full transcript after every change.
pub type Observer = Box<dyn Fn(&[Message]) + Send>;

/// Append-only holder of the transcript, with observer callbacks instead of a
/// process-wide reactive singleton. Whoever needs the store gets handed one.
#[derive(Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    observers: Vec<Observer>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Register an observer; it fires on every `push`, `replace_all` and
    /// `clear`, after the change has been applied.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&[Message]) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Append a message. Messages are never mutated or removed individually.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.notify();
    }

    /// Replace the whole transcript, used when the server's canonical history
    /// supersedes local state.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.notify();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.notify();
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.messages);
        }
    }
}
