//! Shared configuration, route constants, and error types for the Firestore
//! rules conformance workspace.

pub mod config;
pub mod constants;
pub mod error;
