//! Outcome checks with two polarities.
//!
//! Success, authorization denial, and everything else are three disjoint
//! categories. An emulator outage or a malformed request must surface as
//! [`CheckFailure::UnexpectedError`], never as a passing denial case.

use firetest_client::error::ClientError;
use thiserror::Error;

use crate::matrix::Decision;

/// Why an observed outcome did not match the expectation.
#[derive(Error, Debug)]
pub enum CheckFailure {
    #[error("Operation was denied but should have been allowed: {0}")]
    DeniedUnexpectedly(ClientError),

    #[error("Operation succeeded but should have been denied")]
    AllowedUnexpectedly,

    #[error("Operation failed outside rules evaluation: {0}")]
    UnexpectedError(ClientError),
}

/// ## Summary
/// Requires the outcome to be a success and hands back its value.
///
/// ## Errors
/// Returns [`CheckFailure::DeniedUnexpectedly`] on an authorization denial
/// and [`CheckFailure::UnexpectedError`] on any other failure.
pub fn allowed<T>(outcome: Result<T, ClientError>) -> Result<T, CheckFailure> {
    match outcome {
        Ok(value) => Ok(value),
        Err(e) if e.is_permission_denied() => Err(CheckFailure::DeniedUnexpectedly(e)),
        Err(e) => Err(CheckFailure::UnexpectedError(e)),
    }
}

/// ## Summary
/// Requires the outcome to be an authorization denial.
///
/// ## Errors
/// Returns [`CheckFailure::AllowedUnexpectedly`] on success and
/// [`CheckFailure::UnexpectedError`] on any non-authorization failure.
pub fn denied<T>(outcome: Result<T, ClientError>) -> Result<(), CheckFailure> {
    match outcome {
        Ok(_) => Err(CheckFailure::AllowedUnexpectedly),
        Err(e) if e.is_permission_denied() => Ok(()),
        Err(e) => Err(CheckFailure::UnexpectedError(e)),
    }
}

/// ## Summary
/// Checks an outcome against an expected decision.
///
/// ## Errors
/// Returns the corresponding [`CheckFailure`] when the outcome and the
/// decision disagree.
pub fn check_decision<T>(
    expected: Decision,
    outcome: Result<T, ClientError>,
) -> Result<(), CheckFailure> {
    match expected {
        Decision::Allow => allowed(outcome).map(|_| ()),
        Decision::Deny => denied(outcome),
    }
}

/// Panicking form of [`allowed`] for direct use in test bodies.
///
/// ## Panics
/// Panics when the outcome is not a success.
#[track_caller]
pub fn assert_allowed<T>(outcome: Result<T, ClientError>) -> T {
    match allowed(outcome) {
        Ok(value) => value,
        Err(failure) => panic!("{failure}"),
    }
}

/// Panicking form of [`denied`] for direct use in test bodies.
///
/// ## Panics
/// Panics when the outcome is not an authorization denial.
#[track_caller]
pub fn assert_denied<T>(outcome: Result<T, ClientError>) {
    if let Err(failure) = denied(outcome) {
        panic!("{failure}");
    }
}

// ============================================================================
// Tests
// ============================================================================
