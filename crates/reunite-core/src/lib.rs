//! Core types and trait definitions for the Reunite report registries.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends, remote clients and the intake pipeline all depend on it.

pub mod dates;
pub mod error;
pub mod report;
pub mod services;
pub mod store;
pub mod submission;

pub use error::{Error, Result, ValidationError};
