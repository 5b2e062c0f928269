//! The chat transcript shown to the user.
//!
//! The transcript is the visible log. It is distinct from the relay history:
//! placeholders and guidance lines appear here but are never sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a transcript line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// A single visible transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// True while the entry is a placeholder waiting for a relay reply.
    #[serde(default)]
    pub pending: bool,
}

impl TranscriptEntry {
    fn new(speaker: Speaker, text: impl Into<String>, pending: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
            pending,
        }
    }
}

/// Ordered list of transcript entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> Uuid {
        self.push(TranscriptEntry::new(Speaker::User, text, false))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> Uuid {
        self.push(TranscriptEntry::new(Speaker::Assistant, text, false))
    }

    /// Appends an assistant placeholder (e.g. "Thinking...").
    pub fn push_pending(&mut self, text: impl Into<String>) -> Uuid {
        self.push(TranscriptEntry::new(Speaker::Assistant, text, true))
    }

    /// Replaces a pending entry's text in place and marks it settled.
    ///
    /// Returns false if no entry has `id`; the text is then appended instead.
    pub fn resolve(&mut self, id: Uuid, text: impl Into<String>) -> bool {
        let text = text.into();
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.text = text;
                entry.pending = false;
                entry.timestamp = Utc::now();
                true
            }
            None => {
                self.push_assistant(text);
                false
            }
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pending).count()
    }

    fn push(&mut self, entry: TranscriptEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_replaces_placeholder_in_place() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        let placeholder = transcript.push_pending("Thinking...");
        transcript.push_user("still there?");
        assert_eq!(transcript.pending_count(), 1);

        assert!(transcript.resolve(placeholder, "Hello!"));
        assert_eq!(transcript.entries()[1].text, "Hello!");
        assert!(!transcript.entries()[1].pending);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_resolve_unknown_id_appends() {
        let mut transcript = Transcript::new();
        assert!(!transcript.resolve(Uuid::new_v4(), "late reply"));
        assert_eq!(transcript.last().unwrap().text, "late reply");
        assert_eq!(transcript.last().unwrap().speaker, Speaker::Assistant);
    }
}
