//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number has too few digits.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// The number has too many digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
    /// The input contains a character that is not a digit or separator.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A phone number.
///
/// Stored in a normalized form: an optional leading `+` followed by digits
/// only. Common separators (spaces, dashes, dots, parentheses) are stripped
/// on parse. Phone numbers are unique across accounts; the store enforces
/// the constraint and surfaces violations as conflicts.
///
/// ## Constraints
///
/// - 7-15 digits (ITU E.164 range)
/// - Optional leading `+` (country code prefix)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string, normalizing separators away.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits and separators, or falls outside the 7-15 digit range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(format!("{prefix}{digits}")))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Phone::parse("01117890003").is_ok());
        assert!(Phone::parse("+4477722345").is_ok());
        assert!(Phone::parse("1234567").is_ok());
    }

    #[test]
    fn test_parse_normalizes_separators() {
        let phone = Phone::parse("+44 (0) 7772-234.5").unwrap();
        assert_eq!(phone.as_str(), "+44077722345");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse("   "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("123456"),
            Err(PhoneError::TooShort { min: 7 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::TooLong { max: 15 })
        ));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(matches!(
            Phone::parse("0111789a003"),
            Err(PhoneError::InvalidCharacter('a'))
        ));
    }

    #[test]
    fn test_plus_only_allowed_as_prefix() {
        assert!(matches!(
            Phone::parse("0111+890003"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("+4477722345").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+4477722345\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
