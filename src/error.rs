//! Error types for earthcmap.
//!
//! Every fallible operation in the crate returns [`Result`], and errors surface
//! to the caller unchanged. Nothing is retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for earthcmap operations.
#[derive(Error, Debug)]
pub enum EarthCmapError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A catalog source that cannot be used as a definition file
    #[error("Invalid catalog source {}: {message}", .path.display())]
    Catalog { path: PathBuf, message: String },

    /// The colormap name is absent from every catalog source
    #[error("Colormap '{name}' not found in any catalog source")]
    NotFound { name: String },

    /// The unit pair is not in the conversion table
    #[error("Unsupported conversion: {from} -> {to}")]
    UnsupportedConversion { from: String, to: String },

    /// A specification record that cannot be built
    #[error("Malformed specification for '{name}': {message}")]
    MalformedSpecification { name: String, message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Gradient construction errors
    #[error("Gradient error: {message}")]
    Gradient { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },
}

impl EarthCmapError {
    /// Shorthand for a [`EarthCmapError::MalformedSpecification`].
    pub fn malformed(name: &str, message: impl Into<String>) -> Self {
        Self::MalformedSpecification {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// True when the error means the requested colormap does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience type alias for Results with EarthCmapError
pub type Result<T> = std::result::Result<T, EarthCmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EarthCmapError::NotFound {
            name: "ir4".to_string(),
        };
        assert_eq!(err.to_string(), "Colormap 'ir4' not found in any catalog source");
        assert!(err.is_not_found());

        let err = EarthCmapError::UnsupportedConversion {
            from: "mm".to_string(),
            to: "K".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported conversion: mm -> K");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_catalog_error_names_path() {
        let err = EarthCmapError::Catalog {
            path: PathBuf::from("cmaps/ocean.json"),
            message: "expected a JSON object".to_string(),
        };
        assert!(err.to_string().contains("cmaps/ocean.json"));
    }
}
