//! Interactive chat module
//!
//! Provides a line-editor based chat session against a [`TuneBridge`](tunebridge_application::TuneBridge).

mod repl;

pub use repl::ChatRepl;
