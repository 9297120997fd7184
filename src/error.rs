//! Error types for the catalog client, configuration and application startup.
//!
//! The canvas engine itself has no error type: a missing vertex or a
//! release without an active drag is a silent no-op.

/// Failure of a search or filter call against a unit catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("catalog service returned HTTP {0}")]
    Status(u16),

    /// The response body did not match the expected shape
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was dropped before it completed
    #[error("catalog request was abandoned before completing")]
    Unavailable,
}

/// A configuration value outside its permitted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Zoom bounds are not a positive, ordered range
    #[error("invalid zoom range [{min}, {max}]: bounds must be positive with min <= max")]
    ZoomRange {
        /// Configured lower bound
        min: f32,
        /// Configured upper bound
        max: f32,
    },

    /// A zoom step of 1 or less would never change the zoom
    #[error("zoom step must be greater than 1, got {0}")]
    ZoomStep(f32),

    /// Durations and sizes must not be negative
    #[error("{name} must be a non-negative number, got {value}")]
    Negative {
        /// Name of the offending setting
        name: &'static str,
        /// The configured value
        value: f64,
    },

    /// The catalog base URL could not be parsed
    #[error("invalid API URL '{url}': {reason}")]
    ApiUrl {
        /// The configured URL
        url: String,
        /// Parser message
        reason: String,
    },
}

/// Errors that stop the application from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The async runtime could not be created
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// Configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog client could not be built
    #[error("failed to create catalog client: {0}")]
    Catalog(#[from] CatalogError),

    /// The native window failed
    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}
