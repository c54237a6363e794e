use log::debug;
use std::sync::Arc;

use super::payments_model::{NewPayment, Payment};
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
use crate::defects::DefectRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::notices::NoticeRepositoryTrait;
use crate::Error;

/// Service for payments made against notices
pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    notice_repository: Arc<dyn NoticeRepositoryTrait>,
    defect_repository: Arc<dyn DefectRepositoryTrait>,
}

impl PaymentService {
    pub fn new(
        repository: Arc<dyn PaymentRepositoryTrait>,
        notice_repository: Arc<dyn NoticeRepositoryTrait>,
        defect_repository: Arc<dyn DefectRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            notice_repository,
            defect_repository,
        }
    }
}

#[async_trait::async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment> {
        new_payment.validate()?;
        let notice = self.notice_repository.get_by_id(&new_payment.notice_id)?;

        if let Some(defect_id) = &new_payment.defect_id {
            let defect = self.defect_repository.get_by_id(defect_id)?;
            if defect.notice_id != notice.id {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Defect {} does not belong to notice {}",
                    defect_id, notice.id
                ))));
            }
        }

        debug!(
            "Recording payment of {} against notice {}",
            new_payment.amount, notice.id
        );
        self.repository.create(new_payment).await
    }

    async fn delete_payment(&self, payment_id: &str) -> Result<()> {
        self.repository.delete(payment_id).await?;
        Ok(())
    }

    fn list_payments(&self, notice_id: &str) -> Result<Vec<Payment>> {
        self.repository.list_by_notice(notice_id)
    }
}
