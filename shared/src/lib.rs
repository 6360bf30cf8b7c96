//! Shared types and models for the directory back office
//!
//! This crate contains types shared between the backend, the admin UI (via WASM),
//! and other components of the system.

pub mod directory;
pub mod models;
pub mod types;
pub mod validation;

pub use directory::*;
pub use models::*;
pub use types::*;
pub use validation::*;
