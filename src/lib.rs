//! notebin core library
//!
//! Persistence, access control and view-count aggregation for an anonymous
//! note service. The HTTP layer, templates and bot verification live outside
//! this crate and call into it.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod id;
pub mod logging;
pub mod services;
