//! Structured error types for report builds.
//!
//! Every variant is fatal: a build either returns the complete PDF bytes or
//! one of these errors, never a partial document.

use thiserror::Error;

/// The unified error type returned by all public stepreport API functions.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON input failed to parse as a valid report job.
    #[error("Failed to parse report job: {source}{}", hint_suffix(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// A capacity or geometry setting is unusable (zero capacity, no content area).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    /// An image reference could not be read.
    #[error("Resource not found: '{path}': {reason}")]
    ResourceNotFound { path: String, reason: String },
    /// Text or an image could not be sized.
    #[error("Measurement failure: {0}")]
    MeasurementFailure(String),
    /// Content landed somewhere other than where the page plan put it.
    #[error("Pagination drift: {0}")]
    PaginationDrift(String),
    /// The PDF could not be encoded or written.
    #[error("Serialization failure: {0}")]
    SerializationFailure(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report job schema. Check field names, status values and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        ReportError::ParseError { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse report job"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn test_eof_hint() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{\"a\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_resource_not_found_display() {
        let err = ReportError::ResourceNotFound {
            path: "./missing.png".to_string(),
            reason: "No such file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Resource not found: './missing.png': No such file"
        );
    }
}
