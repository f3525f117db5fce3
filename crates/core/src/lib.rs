//! Pahnawa Core - Shared types library.
//!
//! This crate provides common types used across all Pahnawa components:
//! - `storefront` - The catalog interaction layer (search, cart, favorites)
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, price formatting, the
//!   product record, and the signed-in user identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
