//! bookstore-server — online bookstore backend
//!
//! Library surface so integration tests and tooling can drive the service
//! layer directly; the binary entry point lives in `main.rs`.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod live;
pub mod orders;
pub mod pricing;
pub mod state;
