use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// File extension appended to thumbnail paths before display.
pub const IMAGE_EXTENSION: &str = "webp";

/// Identifier of a student, as issued by the roster endpoint.
///
/// The string form produced by `Display` and accepted by `FromStr` is only
/// meant for the persistence boundary, where ids are stored as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = CoreError;

    /// Only the exact form written by `Display` is accepted, so `" 7 "`,
    /// `"+7"` and `"07"` are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .map(Self)
            .filter(|id| id.to_string() == s)
            .ok_or_else(|| CoreError::InvalidId(s.to_string()))
    }
}

impl From<i64> for StudentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single student as returned by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique identifier.
    pub student_id: StudentId,
    /// Display name.
    pub name: String,
    /// Base path of the small tile image (no extension).
    pub thumbnail1: String,
    /// Base path of the large portrait image (no extension).
    pub thumbnail2: String,
}

impl StudentRecord {
    /// Create a record with the given id and name and derived thumbnail paths.
    pub fn new(student_id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        let student_id = student_id.into();
        Self {
            student_id,
            name: name.into(),
            thumbnail1: format!("images/tile/{student_id}"),
            thumbnail2: format!("images/portrait/{student_id}"),
        }
    }

    /// Image shown on grid tiles and in multi-pick results.
    pub fn tile_image(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.thumbnail1)
    }

    /// Image shown for a single-pick result.
    pub fn portrait_image(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.thumbnail2)
    }
}
