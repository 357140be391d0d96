//! services/assistant/src/lib.rs
//!
//! The assistant service: wires the core study logic to a live chat
//! completion backend and adds file handling around it. Feature modules
//! (summarizer, quiz, flashcards, explainer, chat) each take any
//! [`study_buddy_core::ChatCompletionService`] implementation, so they
//! can run against the OpenAI adapter in production and a scripted
//! gateway in tests.

pub mod adapters;
pub mod chat;
pub mod config;
pub mod error;
pub mod explainer;
pub mod export;
pub mod extract;
pub mod flashcards;
pub mod quiz;
pub mod summarizer;

pub use adapters::OpenAiChatAdapter;
pub use config::{Config, ConfigError};
pub use error::AssistantError;
