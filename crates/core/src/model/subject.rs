use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subject: {0}")]
pub struct UnknownSubject(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// The fixed, closed set of tracked subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Mathematics,
    Chemistry,
}

impl Subject {
    /// All subjects, in display order.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Mathematics, Subject::Chemistry];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Mathematics => "Mathematics",
            Subject::Chemistry => "Chemistry",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = UnknownSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Physics" => Ok(Subject::Physics),
            "Mathematics" => Ok(Subject::Mathematics),
            "Chemistry" => Ok(Subject::Chemistry),
            other => Err(UnknownSubject(other.to_string())),
        }
    }
}

/// Difficulty/grouping tier partitioning a subject's chapters.
///
/// Ordering follows the tier number, which is also the declared display
/// order for grouped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Category 1")]
    One,
    #[serde(rename = "Category 2")]
    Two,
    #[serde(rename = "Category 3")]
    Three,
    #[serde(rename = "Category 4")]
    Four,
}

impl Category {
    /// All categories, in tier order.
    pub const ALL: [Category; 4] = [
        Category::One,
        Category::Two,
        Category::Three,
        Category::Four,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::One => "Category 1",
            Category::Two => "Category 2",
            Category::Three => "Category 3",
            Category::Four => "Category 4",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Category 1" => Ok(Category::One),
            "Category 2" => Ok(Category::Two),
            "Category 3" => Ok(Category::Three),
            "Category 4" => Ok(Category::Four),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
