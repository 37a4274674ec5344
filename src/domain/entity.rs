//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! Entities created locally have no identifier until the backend assigns one.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the server-assigned identifier, if the entity was persisted
    fn id(&self) -> Option<&Self::Id>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    /// Local validation failure, caught before anything is sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Connection failure or a non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),
    /// Error reported by the backend, either in the GraphQL `errors` array
    /// or as an error member of a result union
    #[error("Server error{}: {message}", code_suffix(.code))]
    Server {
        code: Option<String>,
        message: String,
    },
    /// Response did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref().map(|c| format!(" [{}]", c)).unwrap_or_default()
}

impl DomainError {
    pub fn server(code: Option<String>, message: impl Into<String>) -> Self {
        DomainError::Server {
            code,
            message: message.into(),
        }
    }

    /// Error code reported by the backend, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            DomainError::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = DomainError::server(Some("INSUFFICIENT_STOCK_ERROR".to_string()), "Only 2 left");
        assert_eq!(err.to_string(), "Server error [INSUFFICIENT_STOCK_ERROR]: Only 2 left");
        assert_eq!(err.code(), Some("INSUFFICIENT_STOCK_ERROR"));

        let bare = DomainError::server(None, "boom");
        assert_eq!(bare.to_string(), "Server error: boom");
        assert_eq!(bare.code(), None);
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            DomainError::Transport("connection refused".to_string()).to_string(),
            "Transport error: connection refused"
        );
    }
}
