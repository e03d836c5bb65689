//! Error types for bricklink_pricer

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for bricklink_pricer operations
#[derive(Debug, Error)]
pub enum PricerError {
    /// One or more API credentials are not set
    #[error("Missing BrickLink API credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    /// Inventory file does not exist
    #[error("XML file '{}' not found", .0.display())]
    InventoryNotFound(PathBuf),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Inventory is not well-formed XML
    #[error("Error parsing XML file: {0}")]
    Xml(#[from] roxmltree::Error),
    /// Failed to parse or write JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result alias for bricklink_pricer operations
pub type Result<T> = std::result::Result<T, PricerError>;
