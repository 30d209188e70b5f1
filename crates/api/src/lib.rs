//! Family Hub API library.
//!
//! Exposes the application modules for integration tests.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod jobs;
pub mod middleware;
pub mod routes;
