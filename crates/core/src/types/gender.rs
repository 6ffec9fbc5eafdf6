//! Gender enum with single-letter wire codes.

use serde::{Deserialize, Serialize};

/// Error returned when a gender code is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid gender code '{0}', expected one of M, F, D, N")]
pub struct GenderError(pub String);

/// Gender of an account holder.
///
/// Serialized as a single-letter code on the wire and in the database:
/// `M` = Male, `F` = Female, `D` = Diverse, `N` = would rather not say.
/// Defaults to [`Gender::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "D")]
    Diverse,
    #[default]
    #[serde(rename = "N")]
    None,
}

impl Gender {
    /// Returns the single-letter code for this gender.
    #[must_use]
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Diverse => "D",
            Self::None => "N",
        }
    }

    /// Parse a gender from its single-letter code.
    ///
    /// # Errors
    ///
    /// Returns [`GenderError`] if the code is not one of `M`, `F`, `D`, `N`.
    pub fn from_code(s: &str) -> Result<Self, GenderError> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "D" => Ok(Self::Diverse),
            "N" => Ok(Self::None),
            other => Err(GenderError(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl std::str::FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

// SQLx support (with postgres feature) - stored as the single-letter code
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Gender {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Gender {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_code(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Gender {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_code(), buf)
    }
}
