//! Core types for KitchenCraft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{Cart, CartItem};
pub use id::*;
pub use product::{Category, Difficulty, Product};
