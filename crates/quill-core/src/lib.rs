//! # Quill Core
//!
//! The domain layer of the Quill demo API.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
