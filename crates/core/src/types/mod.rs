//! Core types for Pahnawa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use id::*;
pub use price::{format_inr, parse_decimal};
pub use product::Product;
pub use user::CurrentUser;
