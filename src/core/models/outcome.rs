//! Uniform outcome of a top-level operation
//!
//! Carries a success flag, an ordered message log and an optional payload.
//! Statuses only ever combine with a logical AND: once failed, an outcome stays
//! failed.

use serde::Serialize;

/// Result of a top-level operation
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    /// Whether the operation succeeded
    pub status: bool,
    /// Human-readable progress and error messages, in order
    pub messages: Vec<String>,
    /// Optional operation result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Outcome<T> {
    /// Create a successful outcome with no messages and no payload
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: true,
            messages: Vec::new(),
            payload: None,
        }
    }

    /// Create a failed outcome carrying a single message
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        let mut outcome = Self::new();
        outcome.update_sep(false, message);
        outcome
    }

    /// Append a message without touching the status
    pub fn append_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Append a message and AND the status in
    pub fn update_sep(&mut self, status: bool, message: impl Into<String>) {
        self.append_message(message);
        self.status &= status;
    }

    /// Merge another outcome's status and messages into this one
    ///
    /// The other payload is discarded.
    pub fn absorb<U>(&mut self, other: Outcome<U>) {
        self.messages.extend(other.messages);
        self.status &= other.status;
    }

    /// Set the payload
    pub fn set_payload(&mut self, payload: T) {
        self.payload = Some(payload);
    }

    /// Builder-style variant of `set_payload`
    #[must_use]
    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Messages joined with newlines
    #[must_use]
    pub fn message(&self) -> String {
        self.messages.join("\n")
    }
}
