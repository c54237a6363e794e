mod settings_model;
mod settings_repository;
mod settings_service;

pub use settings_model::*;
pub use settings_repository::SettingsRepositoryTrait;
pub use settings_service::{SettingsService, SettingsServiceTrait};
