//! Person name type for given and family names.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input string is empty or whitespace-only.
    #[error("name cannot be empty")]
    Empty,
    /// The name is too short.
    #[error("name must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The name is too long.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A given or family name.
///
/// ## Constraints
///
/// - 3-25 characters after trimming surrounding whitespace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Minimum length of a name.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum length of a name.
    pub const MAX_LENGTH: usize = 25;

    /// Parse a `PersonName` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or outside the
    /// 3-25 character bounds.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed.chars().count();
        if len < Self::MIN_LENGTH {
            return Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if len > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PersonName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PersonName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PersonName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PersonName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PersonName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
