use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::notices_model::{DemandDrift, NewNotice, Notice, NoticeFilter, NoticeUpdate};
use super::notices_traits::{NoticeRepositoryTrait, NoticeServiceTrait};
use crate::defects::{recompute_notice_demand, Defect, DefectRepositoryTrait};
use crate::errors::Result;

/// Service for managing notices
pub struct NoticeService {
    repository: Arc<dyn NoticeRepositoryTrait>,
    defect_repository: Arc<dyn DefectRepositoryTrait>,
}

impl NoticeService {
    pub fn new(
        repository: Arc<dyn NoticeRepositoryTrait>,
        defect_repository: Arc<dyn DefectRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            defect_repository,
        }
    }
}

/// Compares each notice's stored demand against its defects.
pub fn find_demand_drift(notices: &[Notice], defects: &[Defect]) -> Vec<DemandDrift> {
    let mut by_notice: HashMap<&str, Vec<Defect>> = HashMap::new();
    for defect in defects {
        by_notice
            .entry(defect.notice_id.as_str())
            .or_default()
            .push(defect.clone());
    }

    notices
        .iter()
        .filter_map(|notice| {
            let computed = by_notice
                .get(notice.id.as_str())
                .map(|list| recompute_notice_demand(list))
                .unwrap_or_default();
            if computed == notice.demand_amount {
                return None;
            }
            Some(DemandDrift {
                notice_id: notice.id.clone(),
                notice_number: notice.notice_number.clone(),
                stored_demand: notice.demand_amount,
                computed_demand: computed,
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl NoticeServiceTrait for NoticeService {
    async fn create_notice(&self, new_notice: NewNotice) -> Result<Notice> {
        new_notice.validate()?;
        debug!(
            "Creating notice {} for {}",
            new_notice.notice_number, new_notice.gstin
        );
        self.repository.create(new_notice).await
    }

    async fn update_notice(&self, notice_update: NoticeUpdate) -> Result<Notice> {
        notice_update.validate()?;
        self.repository.update(notice_update).await
    }

    async fn delete_notice(&self, notice_id: &str) -> Result<()> {
        self.repository.delete(notice_id).await?;
        Ok(())
    }

    fn get_notice(&self, notice_id: &str) -> Result<Notice> {
        self.repository.get_by_id(notice_id)
    }

    fn list_notices(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        self.repository.list(filter)
    }

    fn verify_demand_integrity(&self) -> Result<Vec<DemandDrift>> {
        let notices = self.repository.list(&NoticeFilter::default())?;
        let notice_ids: Vec<String> = notices.iter().map(|n| n.id.clone()).collect();
        let defects = self.defect_repository.list_by_notices(&notice_ids)?;

        let drift = find_demand_drift(&notices, &defects);
        if !drift.is_empty() {
            warn!(
                "Demand integrity check found {} of {} notices out of sync",
                drift.len(),
                notices.len()
            );
        }
        Ok(drift)
    }
}
