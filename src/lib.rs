//! HTTP CRUD gateway over the `users` and `user_profiles` tables.
//!
//! Every route parses its path or body, runs exactly one parameterized
//! statement through a [`store::Store`], and maps the outcome to a status
//! code and JSON body:
//!
//! ```text
//! GET    /api/users/abc   -> 400 {"error":"Requested with an invalid ID!"}
//! GET    /api/users/42    -> 404 {"error":"User not found!"}   (no row)
//! POST   /api/users       -> 201 "User added with ID: 42"
//! DELETE /api/users/42    -> 200 "User deleted with ID: 42"    (row or not)
//! any store failure       -> 500 {"error":"An internal server error occured!"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and the status mapping
//! - [`models`]: User and user profile rows
//! - [`store`]: Store trait, Postgres pool and in-memory store
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{GatewayError, Result};
