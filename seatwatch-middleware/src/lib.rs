#![doc = include_str!("../README.md")]
//! seatwatch-middleware
//!
//! Re-exports for middleware wrappers.

mod cache;

pub use crate::cache::CachedConnector;
