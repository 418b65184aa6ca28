//! Incoming chat message with its routing identifiers.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    pub message: String,
    pub user_id: String,
    pub guild_id: String,
    pub channel_id: String,
}

impl MessageContext {
    pub fn new(
        message: impl Into<String>,
        user_id: impl Into<String>,
        guild_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            user_id: user_id.into(),
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
        }
    }

    /// A message with placeholder identifiers, for local use.
    pub fn local(message: impl Into<String>) -> Self {
        Self::new(message, "local", "local", "local")
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.message.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(())
    }
}
