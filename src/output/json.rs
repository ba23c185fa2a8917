//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RenderInstruction;

    #[test]
    fn test_json_output_new() {
        let output = JsonOutput::new(vec!["alpha", "beta"]);

        assert_eq!(output.data, vec!["alpha", "beta"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_wraps_instruction() {
        let instruction = RenderInstruction::NotFound {
            username: "ghost".to_string(),
        };

        let result = format_json(&instruction).unwrap();

        assert!(result.contains("\"data\""));
        assert!(result.contains("\"meta\""));
        assert!(result.contains("\"status\": \"not_found\""));
        assert!(result.contains("\"username\": \"ghost\""));
        assert!(result.contains("\"version\""));
    }
}
