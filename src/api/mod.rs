//! # API Module
//!
//! The HTTP surface of the service: route bindings and the controllers they
//! delegate to.

pub mod controllers;
pub mod routes;
