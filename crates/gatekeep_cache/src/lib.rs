//! Time-bounded caching for membership lookups.
//!
//! This crate provides a generic TTL cache with a capacity bound and LRU
//! eviction, and the membership cache built on it that shields the bot API
//! from redundant lookups.

#![warn(missing_docs)]

mod cache;
mod member;

pub use cache::{CacheConfig, CacheConfigBuilder, CacheEntry, TtlCache};
pub use member::{MemberCache, MemberKey};
