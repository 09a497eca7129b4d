//! # API Routes Module
//!
//! Configures HTTP routes for the cat registry API.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/cats` - Cat record management endpoints

pub mod cat;
pub mod health;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init).configure(cat::init);
}
