//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! Everything here is in-memory: the store reseeds and the cache empties
//! on process restart.

pub mod cache;
pub mod metrics;
pub mod store;

pub use cache::InMemoryCache;
pub use metrics::HitCounter;
pub use store::InMemoryPostRepository;
