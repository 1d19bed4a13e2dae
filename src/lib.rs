//! Elysium Cache - query layer over guild entity caches.
//!
//! Read-only lookups, filters and searches over in-memory caches of guild
//! channels and emojis. Something else keeps the caches populated; this
//! crate only reads them.
//!
//! ## Architecture
//!
//! - `cache` - Ordered entity stores and the registry that names them
//! - `models` - Channel and emoji records, channel type resolution
//! - `query` - Lookups, filters and the unified search
//! - `request` - JSON requests from untrusted input
//! - `snapshot` - Loading cache contents from JSON
//! - `config` - Environment configuration for the binary
//! - `utils` - String comparison and mention stripping

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod request;
pub mod snapshot;
pub mod utils;

pub use error::{Error, Result};
