//! Core trait definitions for chat providers and key-value persistence.
//!
//! The async chat trait is implemented by `quizmaster-providers`; the
//! key-value trait by `quizmaster-storage`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chat provider trait
// ---------------------------------------------------------------------------

/// Trait for text-completion backends answering quiz-assistant messages.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one message and return the assistant's reply.
    async fn complete(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse>;
}

/// A single chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "gemini-1.5-flash").
    pub model: String,
    /// The user's message.
    pub message: String,
    /// Optional system prompt override.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub content: String,
    /// Model that actually produced the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Default system prompt framing the assistant as a quiz helper.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant embedded in a quiz application. Answer as precisely and as concisely as possible.";

// ---------------------------------------------------------------------------
// Key-value persistence trait
// ---------------------------------------------------------------------------

/// Minimal string key-value store, the shape of browser local storage.
///
/// The trait surface is infallible: implementations degrade (log and drop
/// the write) rather than surface I/O errors, because nothing in the quiz
/// flow can do better than continue without the saved value.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Delete a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}
