//! HTTP clients for the Firestore emulator: identity credentials, document
//! CRUD under rules evaluation, and the emulator's admin surface.

pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
