//! Track locator type.

use serde::{Deserialize, Serialize};

/// An opaque playable locator (a URL string).
///
/// Track identity is locator equality, never an engine-internal index:
/// indices shift as the playback window moves, locators do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locator {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Locator {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_identity_is_string_equality() {
        let a = Locator::new("http://host/track/1");
        let b = Locator::from("http://host/track/1");
        let c = Locator::new("http://host/track/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_locator_serde_transparent() {
        let loc = Locator::new("http://host/track/1");
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "\"http://host/track/1\"");
    }
}
