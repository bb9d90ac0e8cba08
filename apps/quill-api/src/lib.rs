//! Quill API server internals, exposed as a library so integration tests
//! can assemble the same app the binary runs.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
