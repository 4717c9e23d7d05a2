//! Decision Worth common types and errors.
//!
//! This crate provides foundational pieces shared across dw crates:
//! - Unified error taxonomy with stable error codes
//! - Schema versioning for serialized outputs

pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
