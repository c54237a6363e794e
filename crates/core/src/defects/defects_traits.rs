//! Defect repository and service traits.

use async_trait::async_trait;

use super::defects_model::{Defect, DefectUpdate, NewDefect};
use crate::errors::Result;
use crate::notices::Notice;

/// Read side of defect storage.
///
/// Defects are written only through
/// [`NoticeRepositoryTrait::apply_ledger_changes`](crate::notices::NoticeRepositoryTrait::apply_ledger_changes)
/// so the owning notice's demand is committed in the same transaction.
pub trait DefectRepositoryTrait: Send + Sync {
    fn get_by_id(&self, defect_id: &str) -> Result<Defect>;

    /// Defects of one notice, oldest first.
    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Defect>>;

    /// Defects of several notices in one query.
    fn list_by_notices(&self, notice_ids: &[String]) -> Result<Vec<Defect>>;
}

/// Trait defining the contract for Defect service operations.
///
/// Every mutation recomputes and commits the owning notice's demand.
#[async_trait]
pub trait DefectServiceTrait: Send + Sync {
    async fn create_defect(&self, new_defect: NewDefect) -> Result<Defect>;

    async fn update_defect(&self, defect_update: DefectUpdate) -> Result<Defect>;

    async fn delete_defect(&self, defect_id: &str) -> Result<()>;

    fn get_defect(&self, defect_id: &str) -> Result<Defect>;

    fn list_defects(&self, notice_id: &str) -> Result<Vec<Defect>>;

    /// Re-derives a notice's demand from its stored defects and commits it
    /// when it differs. Returns the notice as stored afterwards.
    async fn refresh_notice_demand(&self, notice_id: &str) -> Result<Notice>;
}
