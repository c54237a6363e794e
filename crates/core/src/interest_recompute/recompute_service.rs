use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::recompute_model::{BulkRecomputePreview, BulkRecomputeRequest, BulkRecomputeResult};
use super::recompute_planner::plan_interest_recompute;
use crate::audit::{AuditLogRepositoryTrait, NewAuditEntry};
use crate::constants::{
    AUDIT_ACTION_BULK_INTEREST_RECOMPUTE, AUDIT_ENTITY_ALL, AUDIT_ENTITY_NOTICE,
};
use crate::defects::{Defect, DefectRepositoryTrait};
use crate::errors::Result;
use crate::interest::validate_annual_rate;
use crate::notices::{Notice, NoticeFilter, NoticeLedgerChange, NoticeRepositoryTrait};
use crate::settings::SettingsServiceTrait;
use crate::Error;

#[async_trait::async_trait]
pub trait InterestRecomputeServiceTrait: Send + Sync {
    /// Re-derives interest on every open, overdue notice and commits all
    /// changes in one atomic write. Fails with `Error::RecomputeInProgress`
    /// while another run holds the lock.
    async fn run_bulk_recompute(&self, request: BulkRecomputeRequest)
        -> Result<BulkRecomputeResult>;

    /// Runs the planner only.
    fn preview_bulk_recompute(
        &self,
        target_date: NaiveDate,
        annual_rate_percent: Decimal,
    ) -> Result<BulkRecomputePreview>;

    /// Bulk recompute at the configured default rate.
    async fn run_with_default_rate(&self, target_date: NaiveDate) -> Result<BulkRecomputeResult>;
}

/// Inputs and output of one planning pass.
struct RecomputePlan {
    candidates: Vec<Notice>,
    defects_by_notice: HashMap<String, Vec<Defect>>,
    changes: Vec<NoticeLedgerChange>,
}

impl RecomputePlan {
    /// Net change in interest across the repriced defects.
    fn interest_delta(&self) -> Decimal {
        self.changes
            .iter()
            .flat_map(|change| {
                let before = self.defects_by_notice.get(&change.notice_id);
                change.upserted_defects.iter().map(move |updated| {
                    let previous = before
                        .and_then(|defects| defects.iter().find(|d| d.id == updated.id))
                        .map(Defect::interest_demand)
                        .unwrap_or_default();
                    updated.interest_demand() - previous
                })
            })
            .sum()
    }
}

/// Bulk interest recompute across all open notices.
pub struct InterestRecomputeService {
    notice_repository: Arc<dyn NoticeRepositoryTrait>,
    defect_repository: Arc<dyn DefectRepositoryTrait>,
    audit_log: Arc<dyn AuditLogRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    run_lock: Mutex<()>,
}

impl InterestRecomputeService {
    pub fn new(
        notice_repository: Arc<dyn NoticeRepositoryTrait>,
        defect_repository: Arc<dyn DefectRepositoryTrait>,
        audit_log: Arc<dyn AuditLogRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            notice_repository,
            defect_repository,
            audit_log,
            settings_service,
            run_lock: Mutex::new(()),
        }
    }

    /// Loads the candidate notices and their defects, then plans.
    fn plan(&self, target_date: NaiveDate, annual_rate_percent: Decimal) -> Result<RecomputePlan> {
        let notices = self
            .notice_repository
            .list(&NoticeFilter::open_due_before(target_date))?;
        let notice_ids: Vec<String> = notices.iter().map(|n| n.id.clone()).collect();

        let mut defects_by_notice: HashMap<String, Vec<Defect>> = HashMap::new();
        for defect in self.defect_repository.list_by_notices(&notice_ids)? {
            defects_by_notice
                .entry(defect.notice_id.clone())
                .or_default()
                .push(defect);
        }

        let changes = plan_interest_recompute(
            &notices,
            &defects_by_notice,
            target_date,
            annual_rate_percent,
        )?;
        Ok(RecomputePlan {
            candidates: notices,
            defects_by_notice,
            changes,
        })
    }

    async fn record_audit(
        &self,
        actor: String,
        request: &BulkRecomputeRequest,
        result: &BulkRecomputeResult,
    ) -> Result<()> {
        let details = serde_json::json!({
            "rate": request.annual_rate_percent,
            "targetDate": request.target_date,
            "count": result.updated_count,
            "defectsUpdated": result.defects_updated,
        });
        self.audit_log
            .record(NewAuditEntry {
                entity_type: AUDIT_ENTITY_NOTICE.to_string(),
                entity_id: AUDIT_ENTITY_ALL.to_string(),
                action: AUDIT_ACTION_BULK_INTEREST_RECOMPUTE.to_string(),
                actor,
                details: details.to_string(),
                recorded_at: Utc::now().naive_utc(),
            })
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InterestRecomputeServiceTrait for InterestRecomputeService {
    async fn run_bulk_recompute(
        &self,
        request: BulkRecomputeRequest,
    ) -> Result<BulkRecomputeResult> {
        let _guard = self.run_lock.try_lock().map_err(|_| {
            warn!("Bulk interest recompute rejected: another run is in progress");
            Error::RecomputeInProgress
        })?;
        validate_annual_rate(request.annual_rate_percent)?;

        let actor = match request.actor.as_deref().map(str::trim) {
            Some(actor) if !actor.is_empty() => actor.to_string(),
            _ => self.settings_service.get_settings()?.default_actor,
        };

        info!(
            "Starting bulk interest recompute: target {}, rate {}%",
            request.target_date, request.annual_rate_percent
        );

        let RecomputePlan {
            candidates,
            changes,
            ..
        } = self.plan(request.target_date, request.annual_rate_percent)?;
        let defects_updated = changes.iter().map(|c| c.upserted_defects.len()).sum();
        let updated_count = changes.len();

        if !changes.is_empty() {
            if let Err(e) = self.notice_repository.apply_ledger_changes(changes).await {
                error!(
                    "Bulk interest recompute failed, no notices were changed: {}",
                    e
                );
                return Err(e);
            }
        }

        let result = BulkRecomputeResult {
            updated_count,
            defects_updated,
            target_date: request.target_date,
            annual_rate_percent: request.annual_rate_percent,
        };

        if let Err(e) = self.record_audit(actor, &request, &result).await {
            error!(
                "Bulk interest recompute committed {} notices but the audit entry failed: {}",
                updated_count, e
            );
            return Err(e);
        }

        info!(
            "Bulk interest recompute finished: {} of {} candidate notices updated ({} defects)",
            updated_count,
            candidates.len(),
            defects_updated
        );
        Ok(result)
    }

    fn preview_bulk_recompute(
        &self,
        target_date: NaiveDate,
        annual_rate_percent: Decimal,
    ) -> Result<BulkRecomputePreview> {
        validate_annual_rate(annual_rate_percent)?;
        let plan = self.plan(target_date, annual_rate_percent)?;

        Ok(BulkRecomputePreview {
            notices_affected: plan.changes.len(),
            defects_affected: plan.changes.iter().map(|c| c.upserted_defects.len()).sum(),
            interest_delta: plan.interest_delta(),
        })
    }

    async fn run_with_default_rate(&self, target_date: NaiveDate) -> Result<BulkRecomputeResult> {
        let annual_rate_percent = self.settings_service.get_default_interest_rate()?;
        self.run_bulk_recompute(BulkRecomputeRequest {
            target_date,
            annual_rate_percent,
            actor: None,
        })
        .await
    }
}
