//! quizmaster-storage — key-value store implementations.
//!
//! Two implementations of [`quizmaster_core::traits::KeyValueStore`]: an
//! in-memory map for tests and throwaway runs, and a JSON-file-backed store
//! that plays the role browser local storage played in the original client.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
