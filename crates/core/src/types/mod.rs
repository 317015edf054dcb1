//! Core types for Trocly.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{Price, PriceError, discount_percentage};
pub use product::{Category, ColorOption, Product};
