//! Database model for payments.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ipdesk_core::payments::{NewPayment, Payment, PaymentStatus};

/// Parses a stored amount, falling back to zero on corrupt data so one bad
/// row cannot take down a listing.
fn parse_amount(payment_id: &str, value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!("payment {} has unreadable amount '{}': {}", payment_id, value, e);
        Decimal::ZERO
    })
}

/// Database model for payments. Amounts are stored as decimal strings.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentDB {
    pub id: String,
    pub application_id: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub provider_ref: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PaymentDB {
    /// Builds the row for a freshly initiated payment.
    pub fn from_new(new: NewPayment, currency: &str) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            application_id: new.application_id,
            amount: new.amount.to_string(),
            currency: currency.to_string(),
            status: PaymentStatus::Pending.as_str().to_string(),
            provider_ref: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<PaymentDB> for Payment {
    fn from(db: PaymentDB) -> Self {
        let amount = parse_amount(&db.id, &db.amount);
        Self {
            id: db.id,
            application_id: db.application_id,
            amount,
            currency: db.currency,
            status: PaymentStatus::from_str_lossy(&db.status),
            provider_ref: db.provider_ref,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
