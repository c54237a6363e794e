//! SQLite storage implementation for notices.

mod model;
mod repository;

pub use model::{NoticeDB, NoticeMetadataDB};
pub use repository::NoticeRepository;

// Re-export trait from core for convenience
pub use taxcase_core::notices::NoticeRepositoryTrait;
