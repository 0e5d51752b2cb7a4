use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::api::ChatBackend;
use crate::chat::{MessageStore, SnapshotStore};
use crate::logging::ConversationLogger;
use crate::models::{ChatRequest, FeedbackRequest, Message, Sender};

/// Shown in place of a bot reply whenever the backend round trip fails. The
/// failure surfaces as a chat bubble, never as an error to the caller.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, something went wrong on our end. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum SessionError {
    /// A submission arrived while an earlier round trip was still outstanding.
    #[error("a message is already waiting for a reply")]
    Busy,
}

/// The conversation controller: owns the transcript, the conversation id and
/// the snapshot store, and reconciles backend replies into local state.
///
/// A single round-trip slot is enforced: `send` rejects with
/// [`SessionError::Busy`] while an earlier submission is parked on the
/// network, instead of letting two exchanges interleave.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    store: MessageStore,
    snapshots: SnapshotStore,
    conversation_id: Option<String>,
    next_id: u64,
    in_flight: bool,
    pub logger: Option<ConversationLogger>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, snapshots: SnapshotStore) -> Self {
        Self {
            backend,
            store: MessageStore::new(),
            snapshots,
            conversation_id: None,
            next_id: 1,
            in_flight: false,
            logger: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn store_mut(&mut self) -> &mut MessageStore {
        &mut self.store
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Seed the session from the persisted snapshot. The id counter is moved
    /// past the largest restored id so fresh appends keep ids strictly
    /// increasing.
    pub fn restore(&mut self) {
        let (messages, conversation_id) = self.snapshots.load();
        if let Some(max_id) = messages.iter().map(|m| m.id).max() {
            self.next_id = max_id + 1;
        }
        if !messages.is_empty() {
            self.store.replace_all(messages);
        }
        self.conversation_id = conversation_id;
    }

    /// Send a user message and wait for the bot reply. The user message is
    /// appended optimistically before the round trip; a backend failure ends
    /// as the fixed apology bubble. Returns the appended bot message.
    pub async fn send(&mut self, content: &str) -> Result<Message, SessionError> {
        self.acquire_slot()?;
        let reply = self.exchange(content).await;
        self.in_flight = false;
        Ok(reply)
    }

    /// Send a hidden instruction (not shown as a user message) and append only
    /// the bot's confirmation. On failure the transcript stays untouched.
    pub async fn set_language(&mut self, instruction: &str) -> Option<Message> {
        let request = ChatRequest {
            message: instruction.to_string(),
            conversation_id: self.conversation_id.clone(),
            finalize_previous: None,
        };

        match self.backend.send_message(&request).await {
            Ok(reply) => {
                if self.conversation_id.is_none() {
                    self.conversation_id = reply.conversation_id;
                }
                Some(self.append(Sender::Bot, reply.message).await)
            }
            Err(e) => {
                eprintln!("Language instruction failed: {}", e);
                None
            }
        }
    }

    /// Replace the local transcript with the server's canonical history.
    /// Without a conversation id, or when the server returns nothing, local
    /// state is kept. Adopted entries get fresh local ids, so ids stay unique
    /// even though the sequence is swapped wholesale.
    pub async fn sync_with_server(&mut self) {
        let Some(conversation_id) = self.conversation_id.clone() else {
            return;
        };

        match self.backend.fetch_history(&conversation_id).await {
            Ok(entries) if !entries.is_empty() => {
                let mut entries = entries;
                entries.sort_by_key(|entry| entry.id);

                let mut messages = Vec::with_capacity(entries.len());
                for entry in entries {
                    let sender = match entry.role.as_str() {
                        "user" => Sender::User,
                        _ => Sender::Bot,
                    };
                    messages.push(Message {
                        id: self.mint_id(),
                        sender,
                        content: entry.content,
                        timestamp: entry.timestamp,
                    });
                }
                self.store.replace_all(messages);
                self.persist();
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!(
                    "History sync failed for conversation {}: {}",
                    conversation_id, e
                );
            }
        }
    }

    /// Clear the conversation. A held conversation id is finalized server-side
    /// fire-and-forget: the local reset never waits for it and succeeds even
    /// when the finalize call fails.
    pub fn reset(&mut self) {
        if let Some(conversation_id) = self.conversation_id.take() {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                if let Err(e) = backend.finalize(&conversation_id).await {
                    eprintln!(
                        "Finalize failed for conversation {}: {}",
                        conversation_id, e
                    );
                }
            });
        }

        self.store.clear();
        self.snapshots.clear();
    }

    /// Ask for a human agent: delivers the user's email via the feedback
    /// endpoint so someone can follow up out of band.
    pub async fn request_human_agent(&self, email: &str) -> Result<()> {
        let feedback = FeedbackRequest {
            email: email.to_string(),
            message: "A human agent was requested from the chat client.".to_string(),
        };
        self.backend.send_feedback(&feedback).await
    }

    async fn exchange(&mut self, content: &str) -> Message {
        self.append(Sender::User, content.to_string()).await;

        // A conversation that has no id yet asks the backend to finalize
        // whatever it may still consider open for this client.
        let finalize_previous = self.conversation_id.is_none();
        let request = ChatRequest {
            message: content.to_string(),
            conversation_id: self.conversation_id.clone(),
            finalize_previous: finalize_previous.then_some(true),
        };

        let reply_content = match self.backend.send_message(&request).await {
            Ok(reply) => {
                if self.conversation_id.is_none() {
                    self.conversation_id = reply.conversation_id;
                }
                reply.message
            }
            Err(e) => {
                eprintln!("Chat request failed: {}", e);
                APOLOGY_MESSAGE.to_string()
            }
        };

        self.append(Sender::Bot, reply_content).await
    }

    async fn append(&mut self, sender: Sender, content: String) -> Message {
        let message = Message::new(self.mint_id(), sender, content);
        self.store.push(message.clone());
        if let Some(logger) = &mut self.logger {
            logger.log(sender.as_str(), &message.content).await;
        }
        self.persist();
        message
    }

    fn persist(&self) {
        self.snapshots
            .save(self.store.messages(), self.conversation_id.as_deref());
    }

    /// Ids come from a session-wide monotonic counter, never from the current
    /// transcript length: neither reset nor a wholesale history replacement
    /// can make an id come back.
    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn acquire_slot(&mut self) -> Result<(), SessionError> {
        if self.in_flight {
            return Err(SessionError::Busy);
        }
        self.in_flight = true;
        Ok(())
    }
}
