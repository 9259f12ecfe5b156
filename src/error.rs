//! Error types for the document store.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid collection name: {0:?}")]
    InvalidName(String),

    #[error("Parse error in collection '{collection}': {message}")]
    Parse { collection: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store not initialized")]
    NotInitialized,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
