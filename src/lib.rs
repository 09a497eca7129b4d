//! # Cat Registry Service
//!
//! A REST service managing a registry of cat records backed by a document
//! store.
//!
//! ## Features
//!
//! - Listing, field projection, filtering, and ordering of records
//! - Creation, partial update, hunger toggle, and deletion
//! - Pluggable store backends (in-memory, Redis)
//!
//! ## Architecture
//!
//! The service is built using Actix-web and provides:
//! - HTTP endpoints under `/cats` plus a `/health` probe
//! - A repository layer abstracting the record store
//! - An OpenAPI document describing the surface
//!
//! # Module Structure
//!
//! - `api`: HTTP routes and controllers
//! - `bootstrap`: application state initialization
//! - `config`: environment configuration
//! - `logging`: log sink setup
//! - `models`: record, query, state, and error types
//! - `repositories`: record store backends

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod repositories;

pub use models::{ApiError, AppState};
