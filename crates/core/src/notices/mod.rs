//! Notices module - domain models, services, and traits.

mod notices_model;
mod notices_service;
mod notices_traits;

#[cfg(test)]
mod notices_service_tests;

pub use notices_model::{
    DemandDrift, NewNotice, Notice, NoticeFilter, NoticeLedgerChange, NoticeStatus, NoticeType,
    NoticeUpdate,
};
pub use notices_service::{find_demand_drift, NoticeService};
pub use notices_traits::{NoticeRepositoryTrait, NoticeServiceTrait};
