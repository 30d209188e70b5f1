//! Shared utilities and common types for Family Hub backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation (caller identity)
//! - Common validation logic

pub mod jwt;
pub mod validation;
