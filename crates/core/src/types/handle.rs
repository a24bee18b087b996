//! Cash App payment handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CashAppHandle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input is empty (or only a `$` sign).
    #[error("payment handle cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("payment handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that cannot appear in a handle.
    #[error("payment handle contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A Cash App handle, stored without its leading `$`.
///
/// ## Constraints
///
/// - Surrounding whitespace and one leading `$` are stripped
/// - Length: 1-32 characters after stripping
/// - Only ASCII letters, digits, `-` and `_`
///
/// ## Examples
///
/// ```
/// use supportme_core::CashAppHandle;
///
/// let handle = CashAppHandle::parse("$sigmabread").unwrap();
/// assert_eq!(handle.as_str(), "sigmabread");
/// assert_eq!(handle.to_string(), "$sigmabread");
///
/// assert!(CashAppHandle::parse("").is_err());
/// assert!(CashAppHandle::parse("has space").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CashAppHandle(String);

impl CashAppHandle {
    /// Maximum length of a handle, excluding the `$`.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a handle, accepting an optional leading `$`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty, too long, or contains
    /// characters other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('$').unwrap_or(trimmed);

        if bare.is_empty() {
            return Err(HandleError::Empty);
        }

        if bare.chars().count() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = bare
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(HandleError::InvalidCharacter(bad));
        }

        Ok(Self(bare.to_owned()))
    }

    /// Returns the handle without the `$`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the handle and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CashAppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl std::str::FromStr for CashAppHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CashAppHandle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CashAppHandle> for String {
    fn from(handle: CashAppHandle) -> Self {
        handle.0
    }
}

impl AsRef<str> for CashAppHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
