//! Payment repository and service traits.

use async_trait::async_trait;

use super::payments_model::{NewPayment, Payment};
use crate::errors::Result;

#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    async fn create(&self, new_payment: NewPayment) -> Result<Payment>;

    async fn delete(&self, payment_id: &str) -> Result<usize>;

    /// Payments of one notice, by payment date.
    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Payment>>;
}

#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment>;

    async fn delete_payment(&self, payment_id: &str) -> Result<()>;

    fn list_payments(&self, notice_id: &str) -> Result<Vec<Payment>>;
}
