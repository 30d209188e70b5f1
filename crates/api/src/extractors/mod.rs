//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod family_auth;

pub use family_auth::FamilyAuth;
