//! Row types and shared statements for the account and order tables.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::account::{Account, AccountStatus, SubscriberProfile};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, OrderId, Role, Timestamp};
use crate::domain::premium::{Order, OrderStatus};

pub(super) const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, college_id, role, \
     restricted, credential_hash, last_device_fingerprint, premium_active, premium_expiry, \
     account_status, created_at, updated_at";

pub(super) const ORDER_COLUMNS: &str = "id, provider_order_id, account_id, amount_minor, \
     currency, status, provider_payment_id, created_at, paid_at";

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    college_id: Option<String>,
    role: String,
    restricted: bool,
    credential_hash: String,
    last_device_fingerprint: Option<String>,
    premium_active: Option<bool>,
    premium_expiry: Option<DateTime<Utc>>,
    account_status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(corrupt("role"))?;

        let subscriber = match (row.premium_active, row.account_status) {
            (Some(premium_active), Some(status)) => Some(SubscriberProfile {
                premium_active,
                premium_expiry: row.premium_expiry.map(Timestamp::from_datetime),
                account_status: AccountStatus::from_str(&status).map_err(corrupt("account_status"))?,
            }),
            _ => None,
        };

        Ok(Account {
            id: AccountId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            college_id: row.college_id,
            role,
            restricted: row.restricted,
            credential_hash: row.credential_hash,
            last_device_fingerprint: row.last_device_fingerprint,
            subscriber,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct OrderRow {
    id: Uuid,
    provider_order_id: String,
    account_id: Uuid,
    amount_minor: i64,
    currency: String,
    status: String,
    provider_payment_id: Option<String>,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            provider_order_id: row.provider_order_id,
            account_id: AccountId::from_uuid(row.account_id),
            amount_minor: row.amount_minor,
            currency: row.currency,
            status: OrderStatus::from_str(&row.status).map_err(corrupt("status"))?,
            provider_payment_id: row.provider_payment_id,
            created_at: Timestamp::from_datetime(row.created_at),
            paid_at: row.paid_at.map(Timestamp::from_datetime),
        })
    }
}

fn corrupt<E: std::fmt::Display>(column: &'static str) -> impl Fn(E) -> DomainError {
    move |e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value in database: {}", column, e),
        )
    }
}

pub(super) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

pub(super) fn account_not_found(id: AccountId) -> DomainError {
    DomainError::new(ErrorCode::AccountNotFound, "Account not found")
        .with_detail("account_id", id.to_string())
}

/// Loads an account and holds its row lock until the transaction ends.
pub(super) async fn lock_account(
    conn: &mut PgConnection,
    id: AccountId,
) -> Result<Option<Account>, DomainError> {
    let row: Option<AccountRow> = sqlx::query_as(&format!(
        "SELECT {} FROM accounts WHERE id = $1 FOR UPDATE",
        ACCOUNT_COLUMNS
    ))
    .bind(id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("Failed to lock account"))?;

    row.map(Account::try_from).transpose()
}

/// Writes the mutable state of an account (restriction, device, subscriber record).
pub(super) async fn write_account_state(
    conn: &mut PgConnection,
    account: &Account,
) -> Result<(), DomainError> {
    let subscriber = account.subscriber.as_ref();
    sqlx::query(
        r#"
        UPDATE accounts SET
            restricted = $2,
            last_device_fingerprint = $3,
            premium_active = $4,
            premium_expiry = $5,
            account_status = $6,
            updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(account.id.as_uuid())
    .bind(account.restricted)
    .bind(&account.last_device_fingerprint)
    .bind(subscriber.map(|s| s.premium_active))
    .bind(subscriber.and_then(|s| s.premium_expiry).map(|t| *t.as_datetime()))
    .bind(subscriber.map(|s| s.account_status.as_str()))
    .bind(account.updated_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to update account"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_row() -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            username: "asha".to_string(),
            email: "asha@college.edu".to_string(),
            full_name: "Asha Kumar".to_string(),
            college_id: None,
            role: "SUBSCRIBER".to_string(),
            restricted: false,
            credential_hash: "hash".to_string(),
            last_device_fingerprint: None,
            premium_active: Some(true),
            premium_expiry: Some(now),
            account_status: Some("ACTIVE".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn subscriber_columns_map_to_profile() {
        let account = Account::try_from(account_row()).unwrap();

        let profile = account.subscriber.unwrap();
        assert!(profile.premium_active);
        assert_eq!(profile.account_status, AccountStatus::Active);
    }

    #[test]
    fn null_subscriber_columns_mean_no_record() {
        let mut row = account_row();
        row.role = "STAFF".to_string();
        row.premium_active = None;
        row.premium_expiry = None;
        row.account_status = None;

        assert!(Account::try_from(row).unwrap().subscriber.is_none());
    }

    #[test]
    fn unknown_role_is_database_error() {
        let mut row = account_row();
        row.role = "WIZARD".to_string();

        let err = Account::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn order_status_parses() {
        let now = Utc::now();
        let order = Order::try_from(OrderRow {
            id: Uuid::new_v4(),
            provider_order_id: "order_1".to_string(),
            account_id: Uuid::new_v4(),
            amount_minor: 49900,
            currency: "INR".to_string(),
            status: "PAID".to_string(),
            provider_payment_id: Some("pay_1".to_string()),
            created_at: now,
            paid_at: Some(now),
        })
        .unwrap();

        assert!(order.is_paid());
    }
}
