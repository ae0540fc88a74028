//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Machine-distinguishable error category.
///
/// Adapters map this to their own transport codes (HTTP status, terminal
/// message style); the domain never talks about transports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    InsufficientFunds,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InsufficientFunds => "insufficient_funds",
        }
    }
}

/// Domain-level error.
///
/// Every failure is synchronous and carries a human-readable message. None of
/// them is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced account does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Non-positive amount, policy breach, bad kind, bad denomination,
    /// redemption ordering, same-account transfer.
    #[error("{0}")]
    InvalidArgument(String),

    /// The amount exceeds what the account holds.
    #[error("{0}")]
    InsufficientFunds(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn insufficient_funds(msg: impl Into<String>) -> Self {
        Self::InsufficientFunds(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DomainError::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(m)
            | DomainError::InvalidArgument(m)
            | DomainError::InsufficientFunds(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_message_follow_the_variant() {
        let err = DomainError::insufficient_funds("insufficient balance");
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(err.message(), "insufficient balance");
        assert_eq!(err.to_string(), "insufficient balance");
        assert_eq!(err.kind().as_str(), "insufficient_funds");
    }
}
