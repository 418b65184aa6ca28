//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify;
pub mod initialize;
pub mod process_message;
pub mod search_music;

#[cfg(test)]
pub(crate) mod mocks;
