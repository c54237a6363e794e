//! Interest recompute module - bulk repricing of interest across open notices.
//!
//! A run plans every change up front and commits them in a single
//! [`apply_ledger_changes`](crate::notices::NoticeRepositoryTrait::apply_ledger_changes)
//! call, so a failure leaves every notice as it was.

mod recompute_model;
mod recompute_planner;
mod recompute_service;


pub use recompute_model::{BulkRecomputePreview, BulkRecomputeRequest, BulkRecomputeResult};
pub use recompute_planner::plan_interest_recompute;
pub use recompute_service::{InterestRecomputeService, InterestRecomputeServiceTrait};
