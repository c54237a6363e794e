use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::PaymentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::payments;
use taxcase_core::errors::Result;
use taxcase_core::payments::{NewPayment, Payment, PaymentRepositoryTrait};

pub struct PaymentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PaymentRepository { pool, writer }
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    async fn create(&self, new_payment: NewPayment) -> Result<Payment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Payment> {
                let payment_db = PaymentDB::from_new(
                    new_payment,
                    Uuid::new_v4().to_string(),
                    Utc::now().naive_utc(),
                );
                let result_db = diesel::insert_into(payments::table)
                    .values(&payment_db)
                    .returning(PaymentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Payment::from(result_db))
            })
            .await
    }

    async fn delete(&self, payment_id: &str) -> Result<usize> {
        let payment_id = payment_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(payments::table.find(payment_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let payments_db = payments::table
            .filter(payments::notice_id.eq(notice_id))
            .order((payments::payment_date.asc(), payments::created_at.asc()))
            .select(PaymentDB::as_select())
            .load::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(payments_db.into_iter().map(Payment::from).collect())
    }
}
