use std::fmt::Display;

use thiserror::Error;

use crate::privacy::Category;

macro_rules! from_err {
    ($err:ty, $enum:expr) => {
        impl From<$err> for AppError {
            fn from(e: $err) -> Self {
                $enum(e.into())
            }
        }
    };
}

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The run cannot continue; the snapshot is left partially anonymized
    Fatal,
    /// Errors that abort the current step
    Error,
}

/// Error category for taxonomic classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Errors related to database operations
    Database,
    /// Errors related to configuration
    Configuration,
    /// Errors related to resource limitations
    ResourceLimit,
}

/// Standardized application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("SQLx error: {0}")]
    SqlxError(sqlx::Error),

    #[error("Exhausted random values for {category} from {generator} after {attempts} attempts")]
    UniquenessExhausted {
        category: Category,
        generator: String,
        attempts: u32,
    },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

from_err!(sqlx::Error, AppError::SqlxError);

impl AppError {
    /// Create a new connection error
    pub fn connection(message: impl Display) -> Self {
        Self::ConnectionError(message.to_string())
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConnectionError(_) | Self::SqlxError(_) => ErrorCategory::Database,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::UniquenessExhausted { .. } => ErrorCategory::ResourceLimit,
        }
    }

    /// Get the error severity for this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConnectionError(_) | Self::UniquenessExhausted { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Error,
        }
    }

    /// Log this error with structured logging
    pub fn log(&self) {
        tracing::error!(
            severity = ?self.severity(),
            category = ?self.category(),
            "{}", self
        );
    }
}

pub type Result<T, E = AppError> = core::result::Result<T, E>;
