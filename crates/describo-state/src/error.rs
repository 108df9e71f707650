//! # State Layer Error Types
//!
//! Error types for the remote boundary, the durable key/value storage and
//! configuration loading.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       State Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  ServiceError   │  │  StorageError   │  │     ConfigError         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unauthorized   │  │  Io             │  │  Invalid                │ │
//! │  │  Conflict       │  │  Corrupt        │  │  LoadFailed             │ │
//! │  │  NotFound       │  │  Serialization  │  │  SaveFailed             │ │
//! │  │  Unavailable    │  │                 │  │  InvalidUrl             │ │
//! │  │  InvalidResponse│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! Managers catch `ServiceError` and `StorageError` at their boundary and turn
//! them into a human-readable message (see [`ServiceError::user_message`]).
//! Only configuration loading returns errors to its caller.

use thiserror::Error;

// =============================================================================
// Remote Service Errors
// =============================================================================

/// Result type alias for remote boundary calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure reported by a [`RemoteService`](crate::remote::RemoteService) call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Credentials or token refused by the service.
    #[error("Unauthorized")]
    Unauthorized,

    /// The request conflicts with existing data (e.g. email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested record doesn't exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The service couldn't be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something we can't use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Message suitable for showing on a form or banner.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Invalid email or password".to_string(),
            ServiceError::Conflict(message) => message.clone(),
            ServiceError::NotFound { resource, .. } => format!("{resource} not found"),
            ServiceError::Unavailable(_) => {
                "Service unavailable, please try again".to_string()
            }
            ServiceError::InvalidResponse(_) => "Unexpected response from the server".to_string(),
        }
    }

    /// Returns true if the same request could succeed when repeated later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidResponse(err.to_string())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Result type alias for key/value storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the durable key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but isn't a JSON object of strings.
    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),

    /// A value couldn't be serialized for storage.
    #[error("Failed to serialize value: {0}")]
    Serialization(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure while loading, validating or saving the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid dashboard configuration.
    #[error("Invalid dashboard configuration: {0}")]
    Invalid(String),

    /// API base URL can't be built.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}
