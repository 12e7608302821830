//! # Campus Core
//!
//! The domain layer of the campus backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod guard;
pub mod ports;
pub mod service;

pub use error::DomainError;
