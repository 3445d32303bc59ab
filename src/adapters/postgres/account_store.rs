//! PostgreSQL implementation of AccountStore.
//!
//! Premium and restriction changes lock the account row with
//! `SELECT ... FOR UPDATE`, apply the domain method, and write back in one
//! transaction.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::{Account, DeviceFingerprint, PremiumActivation, PremiumChange};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::ports::AccountStore;

use super::rows::{
    account_not_found, db_error, lock_account, write_account_state, AccountRow, ACCOUNT_COLUMNS,
};

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn insert(&self, account: &Account) -> Result<(), DomainError> {
        let subscriber = account.subscriber.as_ref();
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, username, email, full_name, college_id, role, restricted,
                credential_hash, last_device_fingerprint, premium_active, premium_expiry,
                account_status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.full_name)
        .bind(&account.college_id)
        .bind(account.role.as_str())
        .bind(account.restricted)
        .bind(&account.credential_hash)
        .bind(&account.last_device_fingerprint)
        .bind(subscriber.map(|s| s.premium_active))
        .bind(subscriber.and_then(|s| s.premium_expiry).map(|t| *t.as_datetime()))
        .bind(subscriber.map(|s| s.account_status.as_str()))
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if matches!(
                    db_err.constraint(),
                    Some("accounts_username_key") | Some("accounts_email_lower_key") | Some("accounts_pkey")
                ) {
                    return DomainError::new(
                        ErrorCode::AccountExists,
                        "Username or email already registered",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert account: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find account"))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        // An exact username match wins over an email match.
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts \
             WHERE username = $1 OR lower(email) = lower($1) \
             ORDER BY (username = $1) DESC \
             LIMIT 1",
            ACCOUNT_COLUMNS
        ))
        .bind(identifier.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find account"))?;

        row.map(Account::try_from).transpose()
    }

    async fn record_device(
        &self,
        id: AccountId,
        fingerprint: &DeviceFingerprint,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE accounts SET last_device_fingerprint = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(fingerprint.as_str())
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to record device"))?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }
        Ok(())
    }

    async fn apply_premium(
        &self,
        id: AccountId,
        change: PremiumChange,
        now: Timestamp,
    ) -> Result<(Account, PremiumActivation), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let mut account = lock_account(&mut tx, id)
            .await?
            .ok_or_else(|| account_not_found(id))?;
        let activation = account.apply_premium(change, now)?;
        if activation.was_applied() {
            write_account_state(&mut tx, &account).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok((account, activation))
    }

    async fn set_restricted(
        &self,
        id: AccountId,
        restricted: bool,
        now: Timestamp,
    ) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let mut account = lock_account(&mut tx, id)
            .await?
            .ok_or_else(|| account_not_found(id))?;
        account.set_restricted(restricted, now);
        write_account_state(&mut tx, &account).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(account)
    }

    async fn list_subscribers(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<Account>, DomainError> {
        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts \
             WHERE role = 'SUBSCRIBER' AND ($1::TEXT IS NULL OR college_id = $1) \
             ORDER BY created_at",
            ACCOUNT_COLUMNS
        ))
        .bind(college_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list subscribers"))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
