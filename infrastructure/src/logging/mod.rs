//! Structured interaction logging.
//!
//! Provides [`JsonlEventLogger`], the JSONL implementation of the
//! [`EventLogger`](tunebridge_application::EventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
