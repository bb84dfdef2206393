//! Structured error types for scrollgrid.
//!
//! The sizing core itself never fails; errors only surface at the
//! boundaries (configuration parsing and DOM construction).

/// All errors that can occur while configuring or mounting a scroll grid.
#[derive(Debug, thiserror::Error)]
pub enum ScrollGridError {
    /// Invalid grid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// DOM construction or lookup failure.
    #[error("DOM error: {0}")]
    Dom(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScrollGridError>;

impl From<String> for ScrollGridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ScrollGridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ScrollGridError> for wasm_bindgen::JsValue {
    fn from(e: ScrollGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").map_err(ScrollGridError::from);
        assert!(matches!(err, Err(ScrollGridError::Json(_))));
    }

    #[test]
    fn test_display_prefixes() {
        let err = ScrollGridError::Config("section 2 has no content".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: section 2 has no content"
        );
        assert_eq!(ScrollGridError::from("boom").to_string(), "boom");
    }
}
