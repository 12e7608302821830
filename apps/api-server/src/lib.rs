//! # Campus API Server
//!
//! Library surface of the actix-web binary, shared with the integration tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
