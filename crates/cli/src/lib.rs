//! Library half of the `mentorscope` binary.
//!
//! Holds the pieces worth testing in isolation: configuration loading,
//! plain-text rendering of records and aggregates, and the loop that
//! follows a tracker session and prints progress lines. The binary in
//! `main.rs` only parses arguments and dispatches.

pub mod config;
pub mod render;
pub mod watch;
