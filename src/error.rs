//! Error types and handling for the `Itinera` service

use thiserror::Error;

/// Main error type for the `Itinera` service
#[derive(Error, Debug)]
pub enum ItineraError {
    /// Request shape or identifier validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Generator output could not be converted into day plans
    #[error("Extraction error: {message}")]
    Extraction { message: String },

    /// Provider call failed, was blocked, or returned unusable output
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// No itinerary stored under the given identifier
    #[error("Itinerary not found: {id}")]
    NotFound { id: String },

    /// Document store unreachable or operation failed
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ItineraError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new extraction error
    pub fn extraction<S: Into<String>>(message: S) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for the given identifier
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<fjall::Error> for ItineraError {
    fn from(err: fjall::Error) -> Self {
        ItineraError::persistence(err.to_string())
    }
}
