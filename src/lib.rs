//! Service Catalog Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state management
///
/// Holds the service registry and the validation for its inputs.
pub mod state;
