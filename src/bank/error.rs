//! Errors surfaced by a banking service

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    /// The service could not be reached or timed out
    #[error("banking service unavailable: {0}")]
    Unavailable(String),
    /// The service refused the request (insufficient funds, unknown recipient, ...)
    #[error("{0}")]
    Rejected(String),
}
