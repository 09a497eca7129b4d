//! # Models Module
//!
//! Data structures shared across the service: the cat record and request
//! shapes, the query translation types, application state, and the error
//! taxonomy.

mod cat;
pub use cat::*;

mod query;
pub use query::*;

mod app_state;
pub use app_state::*;

mod error;
pub use error::*;
