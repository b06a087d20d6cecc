//! Chat transcript accumulation.
//!
//! A streamed reply is folded over the transcript: each chunk consumes the
//! current snapshot and yields the next one with the open bot message grown
//! by that chunk. Chunk order is preserved exactly as received.

use crate::domain::{ChatMessage, Sender};
use crate::gemini::GenerationError;
use chrono::Utc;
use futures_util::{Stream, StreamExt};

/// An ordered chat history with a monotonic message counter for ids.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a transcript from previously exchanged messages, keeping the
    /// id counter ahead of what is already present.
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        let next_id = messages.len() as u64;
        Self { messages, next_id }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }

    pub fn push(mut self, sender: Sender, text: impl Into<String>) -> Self {
        let id = format!("msg-{}", self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: None,
        });
        self
    }

    pub fn push_user(self, text: impl Into<String>) -> Self {
        self.push(Sender::User, text)
    }

    pub fn push_system(self, text: impl Into<String>) -> Self {
        self.push(Sender::System, text)
    }

    /// Opens an empty bot reply for chunks to accumulate into.
    pub fn begin_reply(self) -> Self {
        self.push(Sender::Bot, "")
    }

    /// One fold step: returns the next snapshot with the chunk appended to
    /// the trailing bot message. A chunk arriving without an open reply
    /// starts one.
    pub fn absorb_chunk(mut self, chunk: &str) -> Self {
        match self.messages.last_mut() {
            Some(message) if message.sender == Sender::Bot => {
                message.text.push_str(chunk);
                self
            }
            _ => {
                let opened = self.begin_reply();
                opened.absorb_chunk(chunk)
            }
        }
    }
}

/// Folds a finite chunk stream into the transcript. A mid-stream failure is
/// appended as a system message and ends the fold; text accumulated up to
/// that point is retained.
pub async fn collect_reply<S>(transcript: ChatTranscript, chunks: S) -> ChatTranscript
where
    S: Stream<Item = Result<String, GenerationError>>,
{
    let mut transcript = transcript.begin_reply();
    let mut chunks = std::pin::pin!(chunks);

    while let Some(item) = chunks.next().await {
        match item {
            Ok(chunk) => transcript = transcript.absorb_chunk(&chunk),
            Err(err) => {
                tracing::error!(error = %err, "chat stream failed mid-reply");
                return transcript.push_system(format!("The assistant is unavailable: {err}"));
            }
        }
    }

    transcript
}
