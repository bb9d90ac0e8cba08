//! # Quill Shared
//!
//! Wire types shared between the server and any Rust client.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, now_ms};
