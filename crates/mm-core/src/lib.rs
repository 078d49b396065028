//! # mm-core
//!
//! Core types, ID generation, and error types for MarketMind.
//!
//! This crate provides the foundational types shared across all MarketMind crates:
//! - Entity structs for conversation messages and watchlist items
//! - Status enums with state machine transitions
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

pub use errors::CoreError;
