//! Port for structured interaction logging.
//!
//! Defines the [`EventLogger`] trait for recording interaction events
//! (processed messages, search results) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures each
//! interaction in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured interaction event.
pub struct InteractionEvent {
    /// Event type identifier (e.g., "message_processed", "music_search").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InteractionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging interaction events.
///
/// The `log` method is synchronous and non-fallible: logging failures never
/// disturb message processing.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: InteractionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: InteractionEvent) {}
}
