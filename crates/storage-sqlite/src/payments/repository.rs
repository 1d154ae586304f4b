use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use ipdesk_core::payments::{NewPayment, Payment, PaymentRepositoryTrait, PaymentStatus};
use ipdesk_core::Result;

use super::model::PaymentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::payments;

/// Repository for managing payment data in the database.
pub struct PaymentRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    fn get_by_id(&self, payment_id: &str) -> Result<Payment> {
        let mut conn = get_connection(&self.pool)?;
        let row = payments::table
            .find(payment_id)
            .select(PaymentDB::as_select())
            .first::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn get_by_provider_ref(&self, provider_ref: &str) -> Result<Payment> {
        let mut conn = get_connection(&self.pool)?;
        let row = payments::table
            .filter(payments::provider_ref.eq(provider_ref))
            .select(PaymentDB::as_select())
            .first::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_application(&self, application_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments::table
            .filter(payments::application_id.eq(application_id))
            .order(payments::created_at.desc())
            .select(PaymentDB::as_select())
            .load::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn insert(&self, new_payment: NewPayment, currency: &str) -> Result<Payment> {
        let currency = currency.to_string();
        self.writer
            .exec(move |conn| {
                let row = PaymentDB::from_new(new_payment, &currency);
                diesel::insert_into(payments::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn set_provider_ref(&self, payment_id: &str, provider_ref: &str) -> Result<Payment> {
        let payment_id = payment_id.to_string();
        let provider_ref = provider_ref.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                diesel::update(payments::table.find(&payment_id))
                    .set((
                        payments::provider_ref.eq(Some(provider_ref)),
                        payments::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let row = payments::table
                    .find(&payment_id)
                    .select(PaymentDB::as_select())
                    .first::<PaymentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn set_status(&self, payment_id: &str, status: PaymentStatus) -> Result<Payment> {
        let payment_id = payment_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                diesel::update(payments::table.find(&payment_id))
                    .set((
                        payments::status.eq(status.as_str()),
                        payments::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let row = payments::table
                    .find(&payment_id)
                    .select(PaymentDB::as_select())
                    .first::<PaymentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }
}
