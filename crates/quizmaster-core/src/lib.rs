//! quizmaster-core — Question banks, normalization, and the quiz session.
//!
//! This crate defines the canonical data model, the question-bank loader
//! with its fallback chain, and the session state machine that the rest of
//! the quizmaster system builds on.

pub mod error;
pub mod loader;
pub mod model;
pub mod session;
pub mod store;
pub mod traits;
