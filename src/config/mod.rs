//! # Configuration Module
//!
//! Environment-supplied process configuration.

mod server_config;
pub use server_config::*;
