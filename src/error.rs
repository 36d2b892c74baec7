use thiserror::Error;

/// Errors surfaced by the inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl InventoryError {
    /// Stable machine-readable code used in response envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::NotFound(_) => "not_found",
            InventoryError::InvalidArgument(_) => "invalid_argument",
            InventoryError::ActorCommunication(_) => "unavailable",
        }
    }
}
