//! # API Controllers Module
//!
//! Request orchestration and response mapping for the HTTP surface.

pub mod cat;
