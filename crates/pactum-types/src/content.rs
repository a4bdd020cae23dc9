use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A raw pact document, byte-for-byte as published.
///
/// The document is stored unmodified: no reformatting, no key sorting. The
/// content digest is computed over these exact bytes, so a reformatted
/// resubmission yields a new digest even when it is semantically identical.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactContent(String);

impl PactContent {
    /// Wrap a raw JSON document.
    pub fn new(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    /// The document as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document's raw bytes (digest input).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Parse the document into a JSON value for structural comparison.
    pub fn parse(&self) -> Result<serde_json::Value, TypeError> {
        serde_json::from_str(&self.0).map_err(|e| TypeError::MalformedContent(e.to_string()))
    }
}

impl From<&str> for PactContent {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PactContent {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for PactContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PactContent({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_json() {
        let content = PactContent::new(r#"{"interactions": []}"#);
        let value = content.parse().unwrap();
        assert!(value.get("interactions").is_some());
    }

    #[test]
    fn parse_malformed_json_fails() {
        let content = PactContent::new("{not json");
        assert!(matches!(
            content.parse(),
            Err(TypeError::MalformedContent(_))
        ));
    }

    #[test]
    fn bytes_are_preserved_verbatim() {
        let raw = "{\n  \"a\": 1\n}";
        let content = PactContent::new(raw);
        assert_eq!(content.as_str(), raw);
        assert_eq!(content.as_bytes(), raw.as_bytes());
    }
}
