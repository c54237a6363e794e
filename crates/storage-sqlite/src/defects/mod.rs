//! SQLite storage implementation for defects.

mod model;
mod repository;

pub use model::DefectDB;
pub use repository::DefectRepository;

// Re-export trait from core for convenience
pub use taxcase_core::defects::DefectRepositoryTrait;
