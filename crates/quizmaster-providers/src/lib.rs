//! quizmaster-providers — chat backends for the quiz assistant.
//!
//! Implements [`quizmaster_core::traits::ChatProvider`] for the Gemini API,
//! any OpenAI-compatible endpoint, and a mock for tests, plus configuration
//! loading for the whole application.

pub mod config;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use config::{create_provider, load_config, load_config_from, ProviderConfig, QuizmasterConfig};
pub use gemini::GeminiProvider;
pub use mock::MockChatProvider;
pub use openai::OpenAiChatProvider;
