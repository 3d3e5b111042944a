//! Errors raised at the input boundary.
//!
//! The store itself never fails; these errors are produced by the forms that
//! feed it, before a mutation is attempted.

use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// The submitted text was empty or only whitespace.
    #[error("text cannot be empty")]
    Empty,
}
