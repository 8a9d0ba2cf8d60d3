//! Client side of the upstream text-completion API.
//!
//! The relay only needs one capability from the upstream service: start a
//! streamed chat completion and hand back its text deltas. That capability is
//! the `CompletionClient` trait, so the HTTP handler can be exercised with a
//! scripted client in tests while production uses `openai::OpenAiClient`.
//!
//! - `RelayState`: clonable handle injected as `web::Data` in `main.rs`.
//! - `CompletionError`: everything that can go wrong talking to the upstream.

pub mod openai;

use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat completion request. Model and token limit are client settings.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request to completion API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion API answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Text deltas in arrival order. An `Err` item ends the stream.
pub type FragmentStream = BoxStream<'static, Result<String, CompletionError>>;

pub trait CompletionClient: Send + Sync {
    /// Starts a streamed completion.
    ///
    /// Resolves once the upstream has accepted the request, so any failure
    /// before the first byte of the answer surfaces here and not in the stream.
    fn stream_chat(
        &self,
        request: ChatRequest,
    ) -> BoxFuture<'_, Result<FragmentStream, CompletionError>>;
}

/// Shared state of the relay service.
#[derive(Clone)]
pub struct RelayState {
    pub client: Arc<dyn CompletionClient>,
}
