use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::defects_model::{Defect, DefectUpdate, NewDefect};
use super::defects_traits::{DefectRepositoryTrait, DefectServiceTrait};
use super::demand_aggregator::recompute_notice_demand;
use crate::errors::Result;
use crate::notices::{Notice, NoticeLedgerChange, NoticeRepositoryTrait};

/// Service for managing defects and keeping notice demand in step with them
pub struct DefectService {
    repository: Arc<dyn DefectRepositoryTrait>,
    notice_repository: Arc<dyn NoticeRepositoryTrait>,
}

impl DefectService {
    pub fn new(
        repository: Arc<dyn DefectRepositoryTrait>,
        notice_repository: Arc<dyn NoticeRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            notice_repository,
        }
    }

    /// Builds the change set for `notice` given its defect list after the edit.
    fn ledger_change(
        notice: &Notice,
        defects_after: &[Defect],
        upserted: Vec<Defect>,
        deleted: Vec<String>,
    ) -> NoticeLedgerChange {
        NoticeLedgerChange {
            notice_id: notice.id.clone(),
            expected_version: notice.version,
            demand_amount: recompute_notice_demand(defects_after),
            upserted_defects: upserted,
            deleted_defect_ids: deleted,
        }
    }

    async fn commit(&self, change: NoticeLedgerChange) -> Result<()> {
        debug!(
            "Committing ledger change for notice {} (demand {})",
            change.notice_id, change.demand_amount
        );
        self.notice_repository
            .apply_ledger_changes(vec![change])
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DefectServiceTrait for DefectService {
    async fn create_defect(&self, new_defect: NewDefect) -> Result<Defect> {
        new_defect.validate()?;
        let notice = self.notice_repository.get_by_id(&new_defect.notice_id)?;

        let now = Utc::now().naive_utc();
        let defect = Defect {
            id: new_defect
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            notice_id: notice.id.clone(),
            defect_type: new_defect.defect_type,
            description: new_defect.description,
            ledger: new_defect.ledger.sanitized(),
            created_at: now,
            updated_at: now,
        };

        let mut defects = self.repository.list_by_notice(&notice.id)?;
        defects.push(defect.clone());

        self.commit(Self::ledger_change(
            &notice,
            &defects,
            vec![defect.clone()],
            Vec::new(),
        ))
        .await?;
        Ok(defect)
    }

    async fn update_defect(&self, defect_update: DefectUpdate) -> Result<Defect> {
        defect_update.validate()?;
        let existing = self.repository.get_by_id(&defect_update.id)?;
        let notice = self.notice_repository.get_by_id(&existing.notice_id)?;

        let updated = Defect {
            defect_type: defect_update.defect_type,
            description: defect_update.description,
            ledger: defect_update.ledger.sanitized(),
            updated_at: Utc::now().naive_utc(),
            ..existing
        };

        let defects: Vec<Defect> = self
            .repository
            .list_by_notice(&notice.id)?
            .into_iter()
            .map(|d| if d.id == updated.id { updated.clone() } else { d })
            .collect();

        self.commit(Self::ledger_change(
            &notice,
            &defects,
            vec![updated.clone()],
            Vec::new(),
        ))
        .await?;
        Ok(updated)
    }

    async fn delete_defect(&self, defect_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(defect_id)?;
        let notice = self.notice_repository.get_by_id(&existing.notice_id)?;

        let remaining: Vec<Defect> = self
            .repository
            .list_by_notice(&notice.id)?
            .into_iter()
            .filter(|d| d.id != defect_id)
            .collect();

        self.commit(Self::ledger_change(
            &notice,
            &remaining,
            Vec::new(),
            vec![defect_id.to_string()],
        ))
        .await
    }

    fn get_defect(&self, defect_id: &str) -> Result<Defect> {
        self.repository.get_by_id(defect_id)
    }

    fn list_defects(&self, notice_id: &str) -> Result<Vec<Defect>> {
        self.repository.list_by_notice(notice_id)
    }

    async fn refresh_notice_demand(&self, notice_id: &str) -> Result<Notice> {
        let notice = self.notice_repository.get_by_id(notice_id)?;
        let defects = self.repository.list_by_notice(notice_id)?;
        let computed = recompute_notice_demand(&defects);

        if computed == notice.demand_amount {
            return Ok(notice);
        }

        info!(
            "Repairing demand of notice {}: stored {}, computed {}",
            notice.id, notice.demand_amount, computed
        );
        self.commit(Self::ledger_change(&notice, &defects, Vec::new(), Vec::new()))
            .await?;
        self.notice_repository.get_by_id(notice_id)
    }
}
