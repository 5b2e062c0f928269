//! Conversation types: relay history, visible transcript, relay trait.

pub mod message;
pub mod relay;
pub mod transcript;

pub use message::{ChatMessage, ChatRole};
pub use relay::{ChatRelay, RelayError, RequestId};
pub use transcript::{Speaker, Transcript, TranscriptEntry};
