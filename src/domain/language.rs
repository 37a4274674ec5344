//! Language Codes
//!
//! The active display language is passed explicitly into editor and view
//! functions rather than read from ambient UI state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the storefront falls back to for placeholders
pub const DEFAULT_LANGUAGE: &str = "de";

/// Lowercase ISO 639-1 language code as used by the backend (`"de"`, `"fr"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    pub fn default_language() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_normalized() {
        assert_eq!(LanguageCode::new(" FR ").as_str(), "fr");
        assert_eq!(LanguageCode::default().as_str(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_language_code_serializes_as_string() {
        let json = serde_json::to_string(&LanguageCode::new("it")).unwrap();
        assert_eq!(json, "\"it\"");
    }
}
