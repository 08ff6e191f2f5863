//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// The value is not an `HH:MM` time of day.
    #[error("invalid time: {value} (expected HH:MM)")]
    InvalidTime { value: String },

    /// Invalid inversion policy value.
    #[error("invalid inversion policy: {value}")]
    InvalidInversionPolicy { value: String },
}

/// How the validation engine treats an end time that is earlier than the start time.
///
/// An equal start and end is always a full-day block and never affected by this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InversionPolicy {
    /// `end < start` is an overnight span ending the following day.
    #[default]
    AllowOvernight,
    /// `end < start` is rejected as an inverted interval.
    Strict,
}

impl InversionPolicy {
    /// String representation used in configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllowOvernight => "allow_overnight",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for InversionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InversionPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow_overnight" => Ok(Self::AllowOvernight),
            "strict" => Ok(Self::Strict),
            _ => Err(ValidationError::InvalidInversionPolicy {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated, non-blank string newtype with common trait implementations.
macro_rules! define_non_empty_string {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after validation.
            ///
            /// Surrounding whitespace is trimmed; a blank value is rejected.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if trimmed.len() == value.len() {
                    return Ok(Self(value));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_non_empty_string!(
    /// A validated entry identifier.
    ///
    /// Entry IDs are opaque, non-empty strings assigned once at creation.
    /// Uniqueness across the collection is enforced by the entry store.
    EntryId, "entry ID"
);

define_non_empty_string!(
    /// The display label of an entry.
    Title, "title"
);

impl EntryId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
