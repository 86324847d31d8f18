//! Test-environment bootstrap, shared fixtures, and assertion primitives
//! for exercising Firestore security rules against the emulator.

pub mod check;
pub mod env;
pub mod fixtures;
pub mod matrix;
