//! `PostgreSQL` account store.
//!
//! Uses runtime-checked queries (`query_as` with a row type) rather than
//! the sqlx compile-time macros so the crate builds without a reachable
//! database. Uniqueness is enforced by the `account` table's unique
//! constraints; violations are translated to [`StoreError::Conflict`]
//! with the offending column named via the constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wordsmith_core::{AccountId, Email, Gender, PersonName, Phone};

use super::{AccountStore, StoreError};
use crate::models::{Account, AccountPatch, NewAccount};

const SELECT_COLUMNS: &str = "id, first_name, last_name, email_address, phone_number, gender, \
                              address, date_created, date_updated";

/// Production account store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape of the `account` table.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email_address: String,
    phone_number: String,
    gender: String,
    address: Option<String>,
    date_created: DateTime<Utc>,
    date_updated: DateTime<Utc>,
}

impl AccountRow {
    /// Convert a database row into the domain record, re-validating the
    /// stored values on the way out.
    fn into_account(self) -> Result<Account, StoreError> {
        let first_name = PersonName::parse(&self.first_name).map_err(|e| {
            StoreError::DataCorruption(format!("invalid first name in database: {e}"))
        })?;
        let last_name = PersonName::parse(&self.last_name).map_err(|e| {
            StoreError::DataCorruption(format!("invalid last name in database: {e}"))
        })?;
        let email = Email::parse(&self.email_address)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;
        let phone = Phone::parse(&self.phone_number)
            .map_err(|e| StoreError::DataCorruption(format!("invalid phone in database: {e}")))?;
        let gender = Gender::from_code(&self.gender)
            .map_err(|e| StoreError::DataCorruption(format!("invalid gender in database: {e}")))?;

        Ok(Account {
            id: AccountId::new(self.id),
            first_name,
            last_name,
            email,
            phone,
            gender,
            address: self.address,
            date_created: self.date_created,
            date_updated: self.date_updated,
        })
    }
}

/// Translate a unique-constraint violation into a conflict, naming the
/// column from the constraint that fired.
fn map_constraint_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let message = match db_err.constraint() {
            Some(c) if c.contains("email") => "email already exists",
            Some(c) if c.contains("phone") => "phone number already exists",
            _ => "email or phone number already exists",
        };
        return StoreError::Conflict(message.to_owned());
    }
    StoreError::Database(e)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM account ORDER BY date_created ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM account WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO account \
               (first_name, last_name, email_address, phone_number, gender, address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(account.first_name)
        .bind(account.last_name)
        .bind(account.email)
        .bind(account.phone)
        .bind(account.gender)
        .bind(account.address)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        row.into_account()
    }

    async fn update(&self, id: AccountId, patch: AccountPatch) -> Result<Account, StoreError> {
        // COALESCE keeps the stored value for fields absent from the patch.
        // date_updated must advance strictly even when two updates land in
        // the same clock reading.
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE account SET \
               first_name    = COALESCE($2, first_name), \
               last_name     = COALESCE($3, last_name), \
               email_address = COALESCE($4, email_address), \
               phone_number  = COALESCE($5, phone_number), \
               gender        = COALESCE($6, gender), \
               address       = COALESCE($7, address), \
               date_updated  = GREATEST(now(), date_updated + interval '1 microsecond') \
             WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.gender)
        .bind(patch.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        match row {
            Some(row) => row.into_account(),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<(), StoreError> {
        // Idempotent: deleting an unknown id is a no-op. The route layer
        // checks existence first and owns the 404.
        sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_row() -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            first_name: "Mark".to_owned(),
            last_name: "Smith".to_owned(),
            email_address: "mark.smith@gmail.com".to_owned(),
            phone_number: "01117890003".to_owned(),
            gender: "M".to_owned(),
            address: None,
            date_created: now,
            date_updated: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let row = sample_row();
        let id = row.id;
        let account = row.into_account().unwrap();
        assert_eq!(account.id.as_uuid(), id);
        assert_eq!(account.gender, Gender::Male);
        assert_eq!(account.email.as_str(), "mark.smith@gmail.com");
    }

    #[test]
    fn test_row_conversion_rejects_bad_gender() {
        let mut row = sample_row();
        row.gender = "X".to_owned();
        assert!(matches!(
            row.into_account(),
            Err(StoreError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_row_conversion_rejects_bad_email() {
        let mut row = sample_row();
        row.email_address = "not-an-email".to_owned();
        assert!(matches!(
            row.into_account(),
            Err(StoreError::DataCorruption(_))
        ));
    }
}
