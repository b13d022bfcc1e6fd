use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Chapter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(u64);

impl ChapterId {
    /// Creates a new `ChapterId`.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChapterId({})", self.0)
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `ChapterId` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ChapterId from string")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ChapterId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(ChapterId::new).map_err(|_| ParseIdError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_id_display() {
        let id = ChapterId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn chapter_id_from_str() {
        let id: ChapterId = "123".parse().unwrap();
        assert_eq!(id, ChapterId::new(123));
    }

    #[test]
    fn chapter_id_from_str_invalid() {
        let result = "not-a-number".parse::<ChapterId>();
        assert!(result.is_err());
    }

    #[test]
    fn chapter_id_roundtrip() {
        let original = ChapterId::new(42);
        let deserialized: ChapterId = original.to_string().parse().unwrap();
        assert_eq!(original, deserialized);
    }
}
