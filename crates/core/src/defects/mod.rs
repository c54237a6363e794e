//! Defects module - itemized demand components and their aggregation.

mod defects_model;
mod defects_service;
mod defects_traits;
mod demand_aggregator;


pub use defects_model::{Defect, DefectType, DefectUpdate, NewDefect};
pub use defects_service::DefectService;
pub use defects_traits::{DefectRepositoryTrait, DefectServiceTrait};
pub use demand_aggregator::{recompute_defect_totals, recompute_notice_demand, DefectTotals};
