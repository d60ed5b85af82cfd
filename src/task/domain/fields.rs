//! Validated text fields carried by task records.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, trimmed and bounded to the persisted column width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Largest title accepted, matching the persisted column width.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty
    /// after trimming and [`TaskDomainError::TitleTooLong`] when it
    /// exceeds [`TaskTitle::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                limit: Self::MAX_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task description, trimmed, possibly empty, bounded to the persisted
/// column width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Largest description accepted, matching the persisted column width.
    pub const MAX_LENGTH: usize = 500;

    /// Creates a validated task description. Empty input is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when the value
    /// exceeds [`TaskDescription::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong {
                limit: Self::MAX_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Creates the empty description.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Ordered tag collection, normalised at construction.
///
/// Tags are trimmed, lowercased, de-duplicated, and kept in first-seen
/// order; empty entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Creates a normalised tag collection.
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        let mut normalized = Vec::new();
        for tag in tags {
            let cleaned = tag.trim().to_lowercase();
            if cleaned.is_empty() || normalized.contains(&cleaned) {
                continue;
            }
            normalized.push(cleaned);
        }
        Self(normalized)
    }

    /// Creates the empty tag collection.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the collection holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
