//! Shared types for the bookstore platform
//!
//! Common types used across server and tooling crates: error codes and
//! responses, data models, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
