//! Notice repository and service traits.
//!
//! These traits define the contract for notice operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::notices_model::{
    DemandDrift, NewNotice, Notice, NoticeFilter, NoticeLedgerChange, NoticeUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for Notice repository operations.
#[async_trait]
pub trait NoticeRepositoryTrait: Send + Sync {
    /// Creates a new notice with zero demand at version 0.
    async fn create(&self, new_notice: NewNotice) -> Result<Notice>;

    /// Updates notice metadata and bumps its version.
    async fn update(&self, notice_update: NoticeUpdate) -> Result<Notice>;

    /// Deletes a notice together with its defects.
    ///
    /// Returns the number of deleted notices.
    async fn delete(&self, notice_id: &str) -> Result<usize>;

    /// Retrieves a notice by its ID.
    fn get_by_id(&self, notice_id: &str) -> Result<Notice>;

    /// Lists notices matching the filter.
    fn list(&self, filter: &NoticeFilter) -> Result<Vec<Notice>>;

    /// Commits ledger change sets atomically.
    ///
    /// Either every change is applied or none is. A change whose notice is no
    /// longer at `expected_version` fails the whole call with
    /// `Error::ConcurrentModification`. Returns the number of notices written.
    async fn apply_ledger_changes(&self, changes: Vec<NoticeLedgerChange>) -> Result<usize>;
}

/// Trait defining the contract for Notice service operations.
#[async_trait]
pub trait NoticeServiceTrait: Send + Sync {
    async fn create_notice(&self, new_notice: NewNotice) -> Result<Notice>;

    async fn update_notice(&self, notice_update: NoticeUpdate) -> Result<Notice>;

    /// Deletes a notice; its defects go with it.
    async fn delete_notice(&self, notice_id: &str) -> Result<()>;

    fn get_notice(&self, notice_id: &str) -> Result<Notice>;

    fn list_notices(&self, filter: &NoticeFilter) -> Result<Vec<Notice>>;

    /// Notices whose stored demand disagrees with their defects.
    fn verify_demand_integrity(&self) -> Result<Vec<DemandDrift>>;
}
