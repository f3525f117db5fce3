//! Pahnawa Storefront - catalog interaction layer.
//!
//! This crate owns the pieces of the storefront with real invariants:
//! client-side product search, category/filter composition, and persisted
//! cart/favorites state. Everything "hard" (auth, persistence, query
//! execution, image hosting) is delegated to the hosted services consumed
//! through [`firestore`] and read-only identity in `pahnawa_core`.
//!
//! # Architecture
//!
//! - [`catalog`] fetches products once per session and derives the search
//!   text each product is matched against
//! - [`search`] is a pure engine over that snapshot: two-phase free-text
//!   matching, structured filter groups, and sorting
//! - [`cart`] and [`favorites`] own their collections exclusively and
//!   persist through the [`storage`] snapshot adapter on every mutation
//! - [`session`] composes the above into one explicit context object per
//!   application session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod delivery;
pub mod favorites;
pub mod firestore;
pub mod params;
pub mod search;
pub mod session;
pub mod spots;
pub mod storage;
