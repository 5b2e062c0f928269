//! Conversational relay boundary.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::message::ChatMessage;

/// Monotonic id attached to each relay call of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Failures of a relay round trip.
///
/// A reply that parses but lacks text is not an error; it is `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The request could not be sent or the body could not be read.
    #[error("relay transport error: {0}")]
    Transport(String),

    /// The response body was not a JSON document.
    #[error("relay response parse error: {0}")]
    Parse(String),

    /// No endpoint is configured.
    #[error("relay endpoint is not configured")]
    NotConfigured,
}

/// The remote conversational-completion service.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    /// Sends the ordered history and returns the reply text, if the response
    /// carried one.
    async fn complete(
        &self,
        request_id: RequestId,
        messages: Vec<ChatMessage>,
    ) -> Result<Option<String>, RelayError>;
}
