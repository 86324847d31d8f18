//! Firestore REST wire formats: typed field values, documents, resource
//! paths, and the error envelope.

pub mod document;
pub mod error;
pub mod path;
pub mod status;
pub mod value;
