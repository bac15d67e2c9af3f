//! Error types for the Automap core library
//!
//! This module defines the error handling system for Automap, using thiserror
//! for the error definitions and anyhow for errors raised by user callbacks.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for Automap operations
#[derive(Error, Debug)]
pub enum Error {
    /// No mapping is registered for the requested type pair
    #[error("No mapping registered for {source_type} -> {destination_type}")]
    UnregisteredMapping {
        source_type: String,
        destination_type: String,
    },

    /// A configured or resolved property does not fit the destination type
    #[error("Invalid property '{property}' on {type_name}: {message}")]
    InvalidProperty {
        property: String,
        type_name: String,
        message: String,
    },

    /// A value did not have the document shape the engine expects
    #[error("Unexpected document shape for {type_name}: {message}")]
    Shape {
        type_name: String,
        message: String,
    },

    /// JSON serialization and deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A user supplied callback failed while producing a property value
    #[error("Callback for property '{property}' failed: {source}")]
    Callback {
        property: String,
        #[source]
        source: anyhow::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an `UnregisteredMapping` error from two displayable type names
    pub fn unregistered(source: impl ToString, destination: impl ToString) -> Self {
        Error::UnregisteredMapping {
            source_type: source.to_string(),
            destination_type: destination.to_string(),
        }
    }

    /// Build an `InvalidProperty` error
    pub fn invalid_property(
        property: impl Into<String>,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidProperty {
            property: property.into(),
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports a missing type pair registration
    pub fn is_unregistered_mapping(&self) -> bool {
        matches!(self, Error::UnregisteredMapping { .. })
    }

    /// Whether this error reports an invalid property
    pub fn is_invalid_property(&self) -> bool {
        matches!(self, Error::InvalidProperty { .. })
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
